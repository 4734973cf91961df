#![forbid(unsafe_code)]
//! Qt Linguist translation catalogue toolkit for Rust.
//!
//! Reads and writes `.ts` files, keeps every message, comment and plural form
//! of the catalogue in memory, and answers `(context, source, comment)`
//! lookups the way Qt's runtime would.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tscodec::{Codec, Lookup};
//!
//! let mut codec = Codec::new();
//! codec.read_file_by_extension("nls/qt_hu.ts", None)?;
//!
//! let translator = codec.translator("hu")?;
//! match translator.lookup("QFileDialog", "Open", None) {
//!     Lookup::Translated(text) => println!("{text}"),
//!     Lookup::Unfinished | Lookup::NotFound => println!("Open"),
//!     Lookup::Plural(forms) => println!("{}", forms.join(" / ")),
//! }
//! # Ok::<(), tscodec::Error>(())
//! ```
//!
//! # Formats
//!
//! - **Qt Linguist `.ts`**: XML catalogues as written by `lupdate` and Linguist
//! - **JSON**: serde rendering of a [`Catalog`], handy for caching and diffing
//!
//! Placeholders such as `%1` or `%Ln` are kept verbatim; substituting them is
//! left to the caller.

pub mod codec;
pub mod error;
pub mod formats;
pub mod lookup;
pub mod placeholder;
pub mod plural_rules;
pub mod read_options;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, convert, convert_auto, infer_format_from_extension, infer_language_from_path},
    error::Error,
    formats::FormatType,
    lookup::{Lookup, Translator},
    plural_rules::PluralRule,
    read_options::ReadOptions,
    types::{Catalog, Context, Location, Message, MessageKey, Translation, TranslationStatus},
    validation::{Issue, validate_catalog},
};
