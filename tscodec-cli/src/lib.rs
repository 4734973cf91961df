//! CLI library for testing purposes

pub mod config;
pub mod validation;

use tscodec::{Catalog, ReadOptions, codec::read_catalog, infer_format_from_extension};

pub use config::Config;
pub use tscodec::Codec;

/// Reads one catalogue for a subcommand, turning errors into printable text.
pub fn load_catalog(input: &str, options: &ReadOptions) -> Result<Catalog, String> {
    validation::validate_file_path(input)?;
    let format = infer_format_from_extension(input).ok_or_else(|| {
        format!(
            "Cannot infer format of {}. Supported extensions: .ts, .json",
            input
        )
    })?;
    read_catalog(input, format, options).map_err(|e| format!("Error reading {}: {}", input, e))
}
