//! JSON encoding of a single [`Catalog`].
//!
//! This is the serde representation of the core types. It is lossless, so a
//! `.ts` file converted to JSON and back is unchanged.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Catalog};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Format {
    pub catalog: Catalog,
}

impl Parser for Format {
    /// Parses a catalogue from JSON.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    /// Serializes the catalogue as pretty-printed JSON.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, &self).map_err(Error::Json)
    }
}

impl From<Catalog> for Format {
    fn from(catalog: Catalog) -> Self {
        Format { catalog }
    }
}

impl From<Format> for Catalog {
    fn from(format: Format) -> Self {
        format.catalog
    }
}
