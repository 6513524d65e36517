#![doc = include_str!("../README.md")]

pub mod array;
pub mod datetime;
pub mod decode;
pub mod encode;
pub mod error;
mod number;
pub mod options;
pub mod table;
pub mod value;

#[cfg(feature = "serde")]
pub mod de;
#[cfg(feature = "json")]
pub mod json;

pub use crate::array::{Array, KindMismatch};
pub use crate::datetime::{Datetime, DatetimeError};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::options::{Indent, Options};
pub use crate::table::{Document, Table, TableArray};
pub use crate::value::{FromValue, Kind, Value};

use std::io::{Read, Write};
use std::path::Path;

/// Parses a document held in memory. A leading byte-order mark is ignored.
pub fn parse_str(input: &str) -> Result<Document> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    decode::parse_document(input)
}

/// Reads `reader` to the end and parses it.
pub fn parse<R: Read>(mut reader: R) -> Result<Document> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    parse_str(&s)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening document");
    let file = std::fs::File::open(path)?;
    parse(std::io::BufReader::new(file))
}

/// Canonical text with the default [`Options`].
pub fn serialize(doc: &Document) -> String {
    serialize_with(doc, &Options::default())
}

pub fn serialize_with(doc: &Document, options: &Options) -> String {
    encode::encode_document(doc, options)
}

pub fn serialize_to_writer<W: Write>(mut writer: W, doc: &Document, options: &Options) -> Result<()> {
    let s = serialize_with(doc, options);
    writer.write_all(s.as_bytes())?;
    Ok(())
}
