//! Text to [`Document`](crate::Document): a line-oriented structural parser on top of the
//! lexical scanners.

pub mod navigate;
pub mod parser;
pub mod scanner;
pub mod value;

pub use parser::parse_document;
