use indexmap::IndexMap;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::value::{FromValue, Value};

/// A key/value table. Insertion order is kept for output; equality ignores it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    entries: IndexMap<String, Value>,
}

/// The root table produced by a parse.
pub type Document = Table;

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value.
    ///
    /// Uniqueness is the caller's business; the parser checks [`Table::contains`] first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Like [`Table::contains`] but for dotted paths; never fails.
    pub fn contains_qualified(&self, path: &str) -> bool {
        match self.resolve_parent(path) {
            Ok((table, last)) => table.contains(last),
            Err(_) => false,
        }
    }

    pub fn get(&self, key: &str) -> Result<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Looks up `a.b.c` by descending through nested tables.
    ///
    /// Fails with [`Error::KeyNotFound`] when any segment is missing or an intermediate
    /// segment is not a table.
    pub fn get_qualified(&self, path: &str) -> Result<&Value> {
        let (table, last) = self.resolve_parent(path)?;
        table
            .entries
            .get(last)
            .ok_or_else(|| Error::KeyNotFound(path.to_owned()))
    }

    pub fn get_table(&self, key: &str) -> Option<&Table> {
        self.entries.get(key).and_then(Value::as_table)
    }

    pub fn get_table_mut(&mut self, key: &str) -> Option<&mut Table> {
        self.entries.get_mut(key).and_then(Value::as_table_mut)
    }

    pub fn get_array(&self, key: &str) -> Option<&Array> {
        self.entries.get(key).and_then(Value::as_array)
    }

    pub fn get_table_array(&self, key: &str) -> Option<&TableArray> {
        self.entries.get(key).and_then(Value::as_table_array)
    }

    pub fn get_as<T: FromValue>(&self, key: &str) -> Option<T> {
        self.entries.get(key).and_then(T::from_value)
    }

    pub fn get_table_qualified(&self, path: &str) -> Result<Option<&Table>> {
        let (table, last) = self.resolve_parent(path)?;
        Ok(table.get_table(last))
    }

    pub fn get_array_qualified(&self, path: &str) -> Result<Option<&Array>> {
        let (table, last) = self.resolve_parent(path)?;
        Ok(table.get_array(last))
    }

    pub fn get_table_array_qualified(&self, path: &str) -> Result<Option<&TableArray>> {
        let (table, last) = self.resolve_parent(path)?;
        Ok(table.get_table_array(last))
    }

    /// Typed qualified lookup: `Ok(None)` for a missing or mismatched last segment,
    /// `Err` only when an intermediate table is missing.
    pub fn get_qualified_as<T: FromValue>(&self, path: &str) -> Result<Option<T>> {
        let (table, last) = self.resolve_parent(path)?;
        Ok(table.get_as(last))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when some direct entry is a leaf (scalar or array).
    pub fn has_leaf_values(&self) -> bool {
        self.entries.values().any(Value::is_leaf)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    fn resolve_parent<'p>(&self, path: &'p str) -> Result<(&Table, &'p str)> {
        let Some((prefix, last)) = path.rsplit_once('.') else {
            return Ok((self, path));
        };
        let mut table = self;
        for part in prefix.split('.') {
            table = table
                .get_table(part)
                .ok_or_else(|| Error::KeyNotFound(path.to_owned()))?;
        }
        Ok((table, last))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Table {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Table {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

/// Tables sharing one key, as built by repeated `[[name]]` headers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableArray {
    tables: Vec<Table>,
}

impl TableArray {
    /// Creates an empty array of tables.
    ///
    /// An array of tables only exists in text through its `[[key]]` headers, so one that is
    /// still empty when serialized writes nothing and its key is absent after a re-parse.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn last_mut(&mut self) -> Option<&mut Table> {
        self.tables.last_mut()
    }

    pub fn get(&self, idx: usize) -> Option<&Table> {
        self.tables.get(idx)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Table> {
        self.tables.iter()
    }
}

impl<'a> IntoIterator for &'a TableArray {
    type Item = &'a Table;
    type IntoIter = core::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}

impl IntoIterator for TableArray {
    type Item = Table;
    type IntoIter = std::vec::IntoIter<Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}

impl FromIterator<Table> for TableArray {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        TableArray {
            tables: iter.into_iter().collect(),
        }
    }
}
