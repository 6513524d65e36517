use crate::number::format_float;

/// Bare keys may only hold ASCII letters, digits, `_` and `-`.
fn key_needs_quotes(s: &str) -> bool {
    s.is_empty()
        || !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

pub fn format_key(s: &str) -> String {
    if key_needs_quotes(s) {
        escape_and_quote(s)
    } else {
        s.to_owned()
    }
}

/// Dotted header path with each segment formatted as a key.
pub fn format_path(path: &[&str]) -> String {
    let mut out = String::new();
    for (i, seg) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&format_key(seg));
    }
    out
}

/// Basic string with the escapes the parser understands. Other control characters are
/// written as-is.
pub fn escape_and_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_integer(n: i64) -> String {
    n.to_string()
}

pub fn format_f64(f: f64) -> String {
    format_float(f)
}
