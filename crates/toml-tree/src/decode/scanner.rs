//! Cursor over the source and the lexical scanners that run on it.
//!
//! Every scanner starts at the cursor position, consumes exactly the token it recognises and
//! reports failures against the line the cursor is on.

use crate::datetime::{Datetime, DatetimeError};
use crate::error::{Error, ErrorKind, Result};
use crate::number::strip_separators;
use crate::value::Value;

/// Position inside the current line of a borrowed source.
pub struct Cursor<'a> {
    lines: core::str::Lines<'a>,
    line: &'a str,
    pos: usize,
    line_number: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line: "",
            pos: 0,
            line_number: 0,
        }
    }

    /// Moves to the start of the next line. Returns `false` at end of input, leaving the
    /// cursor (and the reported line number) where it was.
    pub fn next_line(&mut self) -> bool {
        match self.lines.next() {
            Some(line) => {
                self.line = line;
                self.pos = 0;
                self.line_number += 1;
                true
            }
            None => false,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn at_eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips `n` bytes; callers only pass lengths of tokens they matched.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.line.len());
    }

    pub fn error(&self, kind: ErrorKind, message: impl Into<String>) -> Error {
        Error::syntax(kind, self.line_number, message)
    }
}

pub fn skip_whitespace(cur: &mut Cursor<'_>) {
    while matches!(cur.peek(), Some(' ' | '\t')) {
        cur.bump();
    }
}

/// True at end of line or at the start of a comment.
pub fn at_line_end(cur: &Cursor<'_>) -> bool {
    cur.at_eol() || cur.peek() == Some('#')
}

/// Accepts only whitespace and an optional comment up to the end of the line.
pub fn expect_line_end(cur: &mut Cursor<'_>) -> Result<()> {
    skip_whitespace(cur);
    match cur.peek() {
        None | Some('#') => Ok(()),
        Some(c) => Err(cur.error(
            ErrorKind::TrailingCharacters,
            format!("unexpected trailing character `{}`; did you forget a `#`?", c),
        )),
    }
}

/// Skips whitespace, comments and whole lines until something meaningful shows up.
/// `what` names the open construct for the end-of-input error.
pub fn skip_whitespace_and_comments(cur: &mut Cursor<'_>, what: &str) -> Result<()> {
    skip_whitespace(cur);
    while at_line_end(cur) {
        if !cur.next_line() {
            return Err(cur.error(
                ErrorKind::UnterminatedConstruct,
                format!("unterminated {}", what),
            ));
        }
        skip_whitespace(cur);
    }
    Ok(())
}

/// Scans a dotted key path such as `a."b.c".d`, stopping before the first character that is
/// neither part of a key nor a `.` separator. Bare segments end at any of `terminators`.
pub fn scan_key_path(cur: &mut Cursor<'_>, terminators: &[char]) -> Result<Vec<String>> {
    let mut path = Vec::new();
    loop {
        path.push(scan_key_segment(cur, terminators)?);
        skip_whitespace(cur);
        if cur.peek() == Some('.') {
            cur.bump();
        } else {
            return Ok(path);
        }
    }
}

fn scan_key_segment(cur: &mut Cursor<'_>, terminators: &[char]) -> Result<String> {
    skip_whitespace(cur);
    match cur.peek() {
        Some('"') => scan_basic_string(cur).map_err(|e| malformed_key(cur, e)),
        Some('\'') => scan_literal_string(cur).map_err(|e| malformed_key(cur, e)),
        _ => scan_bare_key(cur, terminators),
    }
}

fn malformed_key(cur: &Cursor<'_>, err: Error) -> Error {
    match err {
        Error::Syntax { message, .. } => cur.error(ErrorKind::MalformedKey, message),
        other => other,
    }
}

fn scan_bare_key(cur: &mut Cursor<'_>, terminators: &[char]) -> Result<String> {
    let rest = cur.rest();
    let end = rest
        .find(|c: char| terminators.contains(&c))
        .unwrap_or(rest.len());
    let key = rest[..end].trim_end_matches([' ', '\t']);
    if key.is_empty() {
        return Err(cur.error(ErrorKind::MalformedKey, "empty key"));
    }
    if key.contains('#') {
        return Err(cur.error(
            ErrorKind::MalformedKey,
            format!("bare key `{}` cannot contain `#`", key),
        ));
    }
    if key.contains([' ', '\t']) {
        return Err(cur.error(
            ErrorKind::MalformedKey,
            format!("bare key `{}` cannot contain whitespace", key),
        ));
    }
    if key.contains(['[', ']']) {
        return Err(cur.error(
            ErrorKind::MalformedKey,
            format!("bare key `{}` cannot contain `[` or `]`", key),
        ));
    }
    let key = key.to_owned();
    cur.advance(end);
    Ok(key)
}

/// Scans any of the four string forms starting at the cursor.
pub fn scan_string(cur: &mut Cursor<'_>) -> Result<String> {
    let rest = cur.rest();
    if rest.starts_with("\"\"\"") {
        scan_multiline_string(cur, '"')
    } else if rest.starts_with("'''") {
        scan_multiline_string(cur, '\'')
    } else if rest.starts_with('"') {
        scan_basic_string(cur)
    } else {
        scan_literal_string(cur)
    }
}

fn scan_basic_string(cur: &mut Cursor<'_>) -> Result<String> {
    cur.bump();
    let mut out = String::new();
    while let Some(c) = cur.peek() {
        match c {
            '\\' => out.push(scan_escape(cur)?),
            '"' => {
                cur.bump();
                return Ok(out);
            }
            _ => {
                out.push(c);
                cur.bump();
            }
        }
    }
    Err(cur.error(ErrorKind::UnterminatedConstruct, "unterminated string literal"))
}

fn scan_literal_string(cur: &mut Cursor<'_>) -> Result<String> {
    cur.bump();
    let rest = cur.rest();
    match rest.find('\'') {
        Some(end) => {
            let out = rest[..end].to_owned();
            cur.advance(end + 1);
            Ok(out)
        }
        None => Err(cur.error(ErrorKind::UnterminatedConstruct, "unterminated literal string")),
    }
}

fn scan_escape(cur: &mut Cursor<'_>) -> Result<char> {
    cur.bump();
    let decoded = match cur.peek() {
        Some('b') => '\u{0008}',
        Some('t') => '\t',
        Some('n') => '\n',
        Some('f') => '\u{000C}',
        Some('r') => '\r',
        Some('"') => '"',
        Some('\\') => '\\',
        Some(other) => {
            return Err(cur.error(
                ErrorKind::InvalidValue,
                format!("invalid escape sequence `\\{}`", other),
            ));
        }
        None => return Err(cur.error(ErrorKind::InvalidValue, "invalid escape sequence")),
    };
    cur.bump();
    Ok(decoded)
}

/// `"""…"""` or `'''…'''`, pulling further lines from the cursor as needed.
fn scan_multiline_string(cur: &mut Cursor<'_>, delim: char) -> Result<String> {
    let closing = if delim == '"' { "\"\"\"" } else { "'''" };
    cur.advance(3);
    let mut out = String::new();
    // A newline right after the opening delimiter is not part of the value.
    let mut trim_newline = cur.at_eol();
    let mut continuing = false;
    loop {
        if continuing {
            skip_whitespace(cur);
            if !cur.at_eol() {
                continuing = false;
            }
        }
        while !continuing {
            let Some(c) = cur.peek() else { break };
            if delim == '"' && c == '\\' {
                if cur.rest()[1..].trim_start_matches([' ', '\t']).is_empty() {
                    cur.advance(cur.rest().len());
                    continuing = true;
                    break;
                }
                out.push(scan_escape(cur)?);
                continue;
            }
            if cur.rest().starts_with(closing) {
                cur.advance(3);
                return Ok(out);
            }
            out.push(c);
            cur.bump();
        }
        if !cur.next_line() {
            return Err(cur.error(
                ErrorKind::UnterminatedConstruct,
                "unterminated multi-line string",
            ));
        }
        if !continuing && !trim_newline {
            out.push('\n');
        }
        trim_newline = false;
    }
}

/// Integer or float literal, including `inf`/`nan` with an optional sign.
pub fn scan_number(cur: &mut Cursor<'_>) -> Result<Value> {
    let rest = cur.rest();
    let bytes = rest.as_bytes();
    let mut i = 0usize;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    for (word, value) in [("inf", f64::INFINITY), ("nan", f64::NAN)] {
        if rest[i..].starts_with(word) {
            cur.advance(i + word.len());
            return Ok(Value::Float(if negative { -value } else { value }));
        }
    }

    eat_digits(cur, bytes, &mut i)?;
    let mut is_float = false;
    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        i += 1;
        if i == bytes.len() {
            return Err(cur.error(ErrorKind::MalformedNumber, "floats must have trailing digits"));
        }
        eat_digits(cur, bytes, &mut i)?;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        is_float = true;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        eat_digits(cur, bytes, &mut i)?;
    }

    let token = &rest[..i];
    let digits = strip_separators(token);
    let value = if is_float {
        let f: f64 = digits.parse().map_err(|_| {
            cur.error(ErrorKind::MalformedNumber, format!("malformed float `{}`", token))
        })?;
        if f.is_infinite() {
            return Err(cur.error(
                ErrorKind::MalformedNumber,
                format!("float `{}` is out of range", token),
            ));
        }
        Value::Float(f)
    } else {
        let n: i64 = digits.parse().map_err(|_| {
            cur.error(
                ErrorKind::MalformedNumber,
                format!("integer `{}` is out of range", token),
            )
        })?;
        Value::Integer(n)
    };
    cur.advance(i);
    Ok(value)
}

/// One or more digits; each `_` must sit between two digits.
fn eat_digits(cur: &Cursor<'_>, bytes: &[u8], i: &mut usize) -> Result<()> {
    let start = *i;
    while *i < bytes.len() && bytes[*i].is_ascii_digit() {
        *i += 1;
        if *i < bytes.len() && bytes[*i] == b'_' {
            *i += 1;
            if *i >= bytes.len() || !bytes[*i].is_ascii_digit() {
                return Err(cur.error(
                    ErrorKind::MalformedNumber,
                    "`_` must be surrounded by digits",
                ));
            }
        }
    }
    if *i == start {
        return Err(cur.error(ErrorKind::MalformedNumber, "expected digits"));
    }
    Ok(())
}

pub fn scan_bool(cur: &mut Cursor<'_>) -> Result<bool> {
    let rest = cur.rest();
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    let value = match &rest[..end] {
        "true" => true,
        "false" => false,
        word => {
            return Err(cur.error(
                ErrorKind::InvalidBoolean,
                format!("`{}` is not a boolean", word),
            ));
        }
    };
    cur.advance(end);
    Ok(value)
}

/// The run of characters that could belong to a date-time token.
pub fn date_window(rest: &str) -> &str {
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, 'T' | 'Z' | ':' | '-' | '+' | '.')))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Cheap shape test used for lookahead: `YYYY-MM-DDTHH:MM:SS` separators in place.
pub fn looks_like_datetime(rest: &str) -> bool {
    let w = date_window(rest).as_bytes();
    w.len() >= 19 && w[4] == b'-' && w[7] == b'-' && w[10] == b'T' && w[13] == b':' && w[16] == b':'
}

pub fn scan_datetime(cur: &mut Cursor<'_>) -> Result<Datetime> {
    let window = date_window(cur.rest()).as_bytes();
    let malformed = || cur.error(ErrorKind::MalformedDate, "malformed date");
    let mut j = 0usize;

    let digits = |j: &mut usize, width: usize| -> Result<u32> {
        let mut v = 0u32;
        for _ in 0..width {
            match window.get(*j) {
                Some(b) if b.is_ascii_digit() => v = v * 10 + u32::from(b - b'0'),
                _ => return Err(malformed()),
            }
            *j += 1;
        }
        Ok(v)
    };
    let eat = |j: &mut usize, c: u8| -> Result<()> {
        if window.get(*j) == Some(&c) {
            *j += 1;
            Ok(())
        } else {
            Err(malformed())
        }
    };

    let year = digits(&mut j, 4)? as u16;
    eat(&mut j, b'-')?;
    let month = digits(&mut j, 2)? as u8;
    eat(&mut j, b'-')?;
    let day = digits(&mut j, 2)? as u8;
    eat(&mut j, b'T')?;
    let hour = digits(&mut j, 2)? as u8;
    eat(&mut j, b':')?;
    let minute = digits(&mut j, 2)? as u8;
    eat(&mut j, b':')?;
    let second = digits(&mut j, 2)? as u8;
    let out_of_range = |e: DatetimeError| cur.error(ErrorKind::MalformedDate, e.to_string());
    let mut dt = Datetime::new(year, month, day, hour, minute, second).map_err(out_of_range)?;

    if window.get(j) == Some(&b'.') {
        j += 1;
        let start = j;
        while window.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j == start {
            return Err(malformed());
        }
        // Microsecond precision: keep six digits, pad short fractions.
        let mut micros = 0u32;
        for k in 0..6 {
            let d = window.get(start + k).filter(|_| start + k < j);
            micros = micros * 10 + d.map_or(0, |b| u32::from(b - b'0'));
        }
        dt = dt.with_microsecond(micros).map_err(out_of_range)?;
    }

    match window.get(j) {
        Some(b'Z') => j += 1,
        Some(&(sign @ (b'+' | b'-'))) => {
            j += 1;
            let h = digits(&mut j, 2)? as i8;
            eat(&mut j, b':')?;
            let m = digits(&mut j, 2)? as i8;
            let (h, m) = if sign == b'-' { (-h, -m) } else { (h, m) };
            dt = dt.with_offset(h, m).map_err(out_of_range)?;
        }
        _ => {
            return Err(cur.error(
                ErrorKind::MalformedDate,
                "date-time requires `Z` or a `+HH:MM` offset",
            ));
        }
    }
    if j != window.len() {
        return Err(malformed());
    }
    cur.advance(window.len());
    Ok(dt)
}
