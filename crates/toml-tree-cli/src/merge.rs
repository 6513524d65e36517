use toml_tree::{Table, Value};

/// Deep merge: tables present on both sides are merged key by key, anything else in
/// `overlay` replaces what `base` holds.
pub fn merge_into(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        if let Value::Table(incoming) = value {
            if let Some(existing) = base.get_table_mut(&key) {
                merge_into(existing, incoming);
                continue;
            }
            base.insert(key, incoming);
        } else {
            base.insert(key, value);
        }
    }
}
