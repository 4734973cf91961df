//! All error types for the tscodec crate.
//!
//! These are returned from all fallible operations (parsing, serialization, lookup indexing, etc.).

use thiserror::Error;

use crate::types::MessageKey;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("duplicate message {0}")]
    DuplicateKey(MessageKey),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Creates an invalid resource error pointing at a position in the document.
    pub(crate) fn malformed(message: impl Into<String>, position: u64) -> Self {
        Error::InvalidResource(format!("{} (at byte {})", message.into(), position))
    }
}
