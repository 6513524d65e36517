use tracing::{debug, trace};

use crate::decode::navigate;
use crate::decode::scanner::{self, Cursor};
use crate::decode::value::{KEY_TERMINATORS, parse_value};
use crate::error::{ErrorKind, Result};
use crate::table::Document;

/// Bare keys inside a header end at a dot or the closing bracket.
const HEADER_TERMINATORS: &[char] = &['.', ']'];

/// Line-oriented driver that builds a [`Document`] in one pass.
pub struct Parser<'a> {
    cur: Cursor<'a>,
    root: Document,
    /// Path from the root to the table named by the last header.
    current: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn from_input(input: &'a str) -> Self {
        Self {
            cur: Cursor::new(input),
            root: Document::new(),
            current: Vec::new(),
        }
    }

    pub fn parse_document(mut self) -> Result<Document> {
        debug!("parsing document");
        while self.cur.next_line() {
            scanner::skip_whitespace(&mut self.cur);
            if scanner::at_line_end(&self.cur) {
                continue;
            }
            if self.cur.peek() == Some('[') {
                self.parse_header()?;
            } else {
                self.parse_key_value()?;
            }
        }
        debug!(
            lines = self.cur.line_number(),
            keys = self.root.len(),
            "parsed document"
        );
        Ok(self.root)
    }

    fn parse_header(&mut self) -> Result<()> {
        let line = self.cur.line_number();
        self.cur.bump();
        let is_array = self.cur.peek() == Some('[');
        if is_array {
            self.cur.bump();
        }
        scanner::skip_whitespace(&mut self.cur);
        if self.cur.peek() == Some(']') {
            return Err(self.cur.error(ErrorKind::MalformedKey, "empty table name"));
        }
        let path = scanner::scan_key_path(&mut self.cur, HEADER_TERMINATORS)?;

        let closing = if is_array { "]]" } else { "]" };
        if !self.cur.rest().starts_with(closing) {
            return Err(self.cur.error(
                ErrorKind::UnterminatedConstruct,
                format!("expected `{}` to close table header", closing),
            ));
        }
        self.cur.advance(closing.len());
        scanner::expect_line_end(&mut self.cur)?;

        trace!(line, path = %path.join("."), is_array, "header");
        if is_array {
            navigate::push_table_array(&mut self.root, &path, line)?;
        } else {
            navigate::open_table(&mut self.root, &path, line)?;
        }
        self.current = path;
        Ok(())
    }

    fn parse_key_value(&mut self) -> Result<()> {
        let line = self.cur.line_number();
        let path = scanner::scan_key_path(&mut self.cur, KEY_TERMINATORS)?;
        if self.cur.peek() != Some('=') {
            return Err(self.cur.error(
                ErrorKind::UnexpectedCharacter,
                format!("expected `=` after key `{}`", path.join(".")),
            ));
        }
        self.cur.bump();
        scanner::skip_whitespace(&mut self.cur);
        let value = parse_value(&mut self.cur)?;
        trace!(line, key = %path.join("."), kind = %value.kind(), "key/value");

        let table = navigate::resolve(&mut self.root, &self.current, line)?;
        navigate::insert_value(table, &path, value, line)?;
        scanner::expect_line_end(&mut self.cur)
    }
}

/// Parses a whole document held in memory.
pub fn parse_document(input: &str) -> Result<Document> {
    Parser::from_input(input).parse_document()
}
