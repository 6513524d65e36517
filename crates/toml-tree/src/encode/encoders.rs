use crate::{
    datetime::Datetime,
    encode::{primitives, writer::LineWriter},
    table::Table,
    value::Value,
};

/// Writes `table`'s body at `depth`, then its sub-tables and table arrays under full-path
/// headers. `path` holds the keys from the root down to `table`.
pub fn encode_table<'t>(
    table: &'t Table,
    w: &mut LineWriter,
    path: &mut Vec<&'t str>,
    depth: usize,
) {
    for (key, value) in table.iter().filter(|(_, v)| v.is_leaf()) {
        w.line_kv(depth, &primitives::format_key(key), &format_inline(value));
    }

    for (key, value) in table {
        let Value::Table(child) = value else { continue };
        path.push(key);
        header(w, depth, path, false);
        encode_table(child, w, path, depth + 1);
        path.pop();
    }

    for (key, value) in table {
        let Value::TableArray(tables) = value else { continue };
        path.push(key);
        for element in tables {
            header(w, depth, path, true);
            encode_table(element, w, path, depth + 1);
        }
        path.pop();
    }
}

/// Headers are separated from preceding content by a blank line, except when they follow
/// another header directly.
fn header(w: &mut LineWriter, depth: usize, path: &[&str], is_array: bool) {
    if !w.is_empty() && !w.after_header() {
        w.blank_line();
    }
    w.line_header(depth, &primitives::format_path(path), is_array);
}

/// Single-line rendering used for values on the right of `=` and inside arrays.
pub fn format_inline(value: &Value) -> String {
    match value {
        Value::String(s) => primitives::escape_and_quote(s),
        Value::Integer(n) => primitives::format_integer(*n),
        Value::Float(f) => primitives::format_f64(*f),
        Value::Boolean(b) => primitives::format_bool(*b).to_owned(),
        Value::Datetime(dt) => format_datetime(dt),
        Value::Array(arr) => join_bracketed(arr.iter().map(format_inline)),
        Value::Table(t) => format_inline_table(t),
        // Only reachable inside inline context; degrades to an array of inline tables.
        Value::TableArray(ta) => join_bracketed(ta.iter().map(format_inline_table)),
    }
}

fn format_datetime(dt: &Datetime) -> String {
    dt.to_string()
}

fn format_inline_table(table: &Table) -> String {
    if table.is_empty() {
        return String::from("{}");
    }
    let cells: Vec<String> = table
        .iter()
        .map(|(k, v)| format!("{} = {}", primitives::format_key(k), format_inline(v)))
        .collect();
    format!("{{ {} }}", cells.join(", "))
}

fn join_bracketed(cells: impl Iterator<Item = String>) -> String {
    let cells: Vec<String> = cells.collect();
    format!("[{}]", cells.join(", "))
}
