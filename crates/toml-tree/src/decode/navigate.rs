//! Walking and growing the table tree along dotted key paths.
//!
//! Rules shared by headers and dotted keys:
//! - a missing segment is created as an implicit, empty table
//! - a segment holding a table array continues into its last table
//! - a segment holding any other value is a conflict

use crate::error::{Error, ErrorKind, Result};
use crate::table::{Table, TableArray};
use crate::value::Value;

fn dotted(path: &[String]) -> String {
    path.join(".")
}

fn split_path(path: &[String], line: usize) -> Result<(&String, &[String])> {
    path.split_last()
        .ok_or_else(|| Error::syntax(ErrorKind::MalformedKey, line, "empty key"))
}

/// Steps into `key`, creating an implicit table when it is absent.
pub fn descend<'t>(table: &'t mut Table, key: &str, line: usize) -> Result<&'t mut Table> {
    if !table.contains(key) {
        table.insert(key, Table::new());
    }
    match table.get_mut(key)? {
        Value::Table(t) => Ok(t),
        Value::TableArray(ta) => ta.last_mut().ok_or_else(|| {
            Error::syntax(
                ErrorKind::TableRedefinition,
                line,
                format!("table array `{}` has no tables", key),
            )
        }),
        other => Err(Error::syntax(
            ErrorKind::DuplicateKey,
            line,
            format!("key `{}` is already defined as a {}", key, other.kind()),
        )),
    }
}

/// Re-resolves a path recorded by an earlier header.
pub fn resolve<'t>(root: &'t mut Table, path: &[String], line: usize) -> Result<&'t mut Table> {
    let mut table = root;
    for key in path {
        table = descend(table, key, line)?;
    }
    Ok(table)
}

/// `[a.b.c]`: reuse an implicitly created table or create a new one.
pub fn open_table<'t>(root: &'t mut Table, path: &[String], line: usize) -> Result<&'t mut Table> {
    let (last, parents) = split_path(path, line)?;
    let parent = resolve(root, parents, line)?;
    let fresh = !parent.contains(last);
    if fresh {
        parent.insert(last.as_str(), Table::new());
    }
    match parent.get_mut(last)? {
        Value::Table(t) if !fresh && t.has_leaf_values() => Err(Error::syntax(
            ErrorKind::TableRedefinition,
            line,
            format!("redefinition of table `{}`", dotted(path)),
        )),
        Value::Table(t) => Ok(t),
        other => Err(Error::syntax(
            ErrorKind::TableRedefinition,
            line,
            format!("key `{}` is already defined as a {}", dotted(path), other.kind()),
        )),
    }
}

/// `[[a.b.c]]`: append a fresh table to the array, creating the array if needed.
pub fn push_table_array<'t>(
    root: &'t mut Table,
    path: &[String],
    line: usize,
) -> Result<&'t mut Table> {
    let (last, parents) = split_path(path, line)?;
    let parent = resolve(root, parents, line)?;
    if !parent.contains(last) {
        parent.insert(last.as_str(), TableArray::new());
    }
    match parent.get_mut(last)? {
        Value::TableArray(ta) => {
            ta.push(Table::new());
            ta.last_mut().ok_or_else(|| {
                Error::syntax(ErrorKind::TableRedefinition, line, "empty table array")
            })
        }
        other => Err(Error::syntax(
            ErrorKind::TableRedefinition,
            line,
            format!("key `{}` is already defined as a {}", dotted(path), other.kind()),
        )),
    }
}

/// Inserts `value` under a possibly dotted key below `table`. A key that already exists in
/// the target table is a duplicate, whatever it holds.
pub fn insert_value(table: &mut Table, path: &[String], value: Value, line: usize) -> Result<()> {
    let (last, parents) = split_path(path, line)?;
    let target = resolve(table, parents, line)?;
    if target.contains(last) {
        return Err(Error::syntax(
            ErrorKind::DuplicateKey,
            line,
            format!("key `{}` is already defined", dotted(path)),
        ));
    }
    target.insert(last.as_str(), value);
    Ok(())
}
