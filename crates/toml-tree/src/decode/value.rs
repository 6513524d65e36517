//! Value dispatch, arrays and inline tables.

use tracing::trace;

use crate::array::Array;
use crate::decode::navigate;
use crate::decode::scanner::{self, Cursor};
use crate::error::{ErrorKind, Result};
use crate::table::Table;
use crate::value::Value;

/// Bare keys in key/value position end at a dot or the equals sign.
pub(crate) const KEY_TERMINATORS: &[char] = &['.', '='];

/// Parses the value starting at the cursor, choosing the literal form by lookahead.
pub fn parse_value(cur: &mut Cursor<'_>) -> Result<Value> {
    let rest = cur.rest();
    match cur.peek() {
        Some('"' | '\'') => scanner::scan_string(cur).map(Value::String),
        Some(_) if scanner::looks_like_datetime(rest) => {
            scanner::scan_datetime(cur).map(Value::Datetime)
        }
        Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => scanner::scan_number(cur),
        Some('i' | 'n') if rest.starts_with("inf") || rest.starts_with("nan") => {
            scanner::scan_number(cur)
        }
        Some('t' | 'f') => scanner::scan_bool(cur).map(Value::Boolean),
        Some('[') => parse_array(cur).map(Value::Array),
        Some('{') => parse_inline_table(cur).map(Value::Table),
        Some(c) => Err(cur.error(
            ErrorKind::InvalidValue,
            format!("unexpected `{}` where a value was expected", c),
        )),
        None => Err(cur.error(ErrorKind::InvalidValue, "expected a value")),
    }
}

/// `[ v, v, ... ]`, possibly spanning lines and carrying comments between elements.
pub fn parse_array(cur: &mut Cursor<'_>) -> Result<Array> {
    let start_line = cur.line_number();
    cur.bump();
    let mut arr = Array::new();
    scanner::skip_whitespace_and_comments(cur, "array")?;
    loop {
        if cur.peek() == Some(']') {
            cur.bump();
            break;
        }
        let value = parse_value(cur)?;
        arr.push(value)
            .map_err(|m| cur.error(ErrorKind::HeterogeneousArray, m.to_string()))?;
        scanner::skip_whitespace_and_comments(cur, "array")?;
        match cur.peek() {
            Some(',') => {
                cur.bump();
                scanner::skip_whitespace_and_comments(cur, "array")?;
            }
            Some(']') => {
                cur.bump();
                break;
            }
            Some(c) => {
                return Err(cur.error(
                    ErrorKind::UnexpectedCharacter,
                    format!("expected `,` or `]` after array element, found `{}`", c),
                ));
            }
            None => {
                return Err(cur.error(ErrorKind::UnterminatedConstruct, "unterminated array"));
            }
        }
    }
    if cur.line_number() != start_line {
        trace!(start_line, end_line = cur.line_number(), len = arr.len(), "multi-line array");
    }
    Ok(arr)
}

/// `{ k = v, ... }`. Keys stay on one line; values may not.
pub fn parse_inline_table(cur: &mut Cursor<'_>) -> Result<Table> {
    cur.bump();
    let mut table = Table::new();
    scanner::skip_whitespace(cur);
    if cur.peek() == Some('}') {
        cur.bump();
        return Ok(table);
    }
    loop {
        if cur.at_eol() {
            return Err(cur.error(ErrorKind::UnterminatedConstruct, "unterminated inline table"));
        }
        let key_line = cur.line_number();
        let path = scanner::scan_key_path(cur, KEY_TERMINATORS)?;
        if cur.peek() != Some('=') {
            return Err(cur.error(
                ErrorKind::UnexpectedCharacter,
                format!("expected `=` after key `{}`", path.join(".")),
            ));
        }
        cur.bump();
        scanner::skip_whitespace(cur);
        let value = parse_value(cur)?;
        navigate::insert_value(&mut table, &path, value, key_line)?;
        scanner::skip_whitespace(cur);
        match cur.peek() {
            Some(',') => {
                cur.bump();
                scanner::skip_whitespace(cur);
            }
            Some('}') => {
                cur.bump();
                return Ok(table);
            }
            Some(c) => {
                return Err(cur.error(
                    ErrorKind::UnexpectedCharacter,
                    format!("expected `,` or `}}` in inline table, found `{}`", c),
                ));
            }
            None => {
                return Err(cur.error(
                    ErrorKind::UnterminatedConstruct,
                    "unterminated inline table",
                ));
            }
        }
    }
}
