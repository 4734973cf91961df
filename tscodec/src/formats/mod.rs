//! All supported catalogue encodings for tscodec.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod json;
pub mod ts;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use json::Format as JsonFormat;
pub use ts::Format as TsFormat;

use crate::Error;

/// Represents all supported catalogue encodings for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Qt Linguist `.ts` XML.
    Ts,
    /// JSON rendering of the catalogue model.
    Json,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use tscodec::formats::FormatType;
/// assert_eq!(FormatType::Ts.to_string(), "ts");
/// assert_eq!(FormatType::Json.to_string(), "json");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Ts => write!(f, "ts"),
            FormatType::Json => write!(f, "json"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts the following case-insensitive strings:
/// - `"ts"`, `"linguist"`, `"xml"` → `FormatType::Ts`
/// - `"json"` → `FormatType::Json`
///
/// Returns [`crate::error::Error::UnknownFormat`] for unknown strings.
///
/// # Example
/// ```rust
/// use tscodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("ts").unwrap(), FormatType::Ts);
/// assert_eq!(FormatType::from_str("JSON").unwrap(), FormatType::Json);
/// assert!(FormatType::from_str("strings").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "ts" | "linguist" | "xml" => Ok(FormatType::Ts),
            "json" => Ok(FormatType::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Ts => "ts",
            FormatType::Json => "json",
        }
    }
}
