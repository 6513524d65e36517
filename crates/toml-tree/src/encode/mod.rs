//! Document to canonical TOML text.

pub mod encoders;
pub mod primitives;
pub mod writer;

use crate::{options::Options, table::Table};

pub fn encode_document(table: &Table, options: &Options) -> String {
    let mut w = writer::LineWriter::new(options.indent);
    let mut path = Vec::new();
    encoders::encode_table(table, &mut w, &mut path, 0);
    w.into_string()
}
