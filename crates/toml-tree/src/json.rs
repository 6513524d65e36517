//! JSON renderings of a document.
//!
//! [`to_json`] maps the tree onto plain JSON (datetimes become strings, non-finite floats
//! become `null`). [`to_tagged_json`] keeps every leaf's type next to its text, in the shape
//! used by TOML conformance suites:
//!
//! ```text
//! { "n": { "type": "integer", "value": "42" } }
//! ```

use serde_json::{Map, Value as Json};

use crate::number::format_float;
use crate::table::Table;
use crate::value::Value;

pub fn to_json(table: &Table) -> Json {
    Json::Object(plain_table(table))
}

fn plain_table(table: &Table) -> Map<String, Json> {
    table
        .iter()
        .map(|(k, v)| (k.clone(), plain_value(v)))
        .collect()
}

fn plain_value(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Integer(n) => Json::from(*n),
        Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Datetime(dt) => Json::String(dt.to_string()),
        Value::Array(arr) => Json::Array(arr.iter().map(plain_value).collect()),
        Value::Table(t) => Json::Object(plain_table(t)),
        Value::TableArray(ta) => Json::Array(ta.iter().map(|t| Json::Object(plain_table(t))).collect()),
    }
}

pub fn to_tagged_json(table: &Table) -> Json {
    Json::Object(tagged_table(table))
}

fn tagged_table(table: &Table) -> Map<String, Json> {
    table
        .iter()
        .map(|(k, v)| (k.clone(), tagged_value(v)))
        .collect()
}

fn tagged(ty: &str, value: Json) -> Json {
    let mut m = Map::new();
    m.insert("type".to_owned(), Json::String(ty.to_owned()));
    m.insert("value".to_owned(), value);
    Json::Object(m)
}

fn tagged_value(value: &Value) -> Json {
    match value {
        Value::String(s) => tagged("string", Json::String(s.clone())),
        Value::Integer(n) => tagged("integer", Json::String(n.to_string())),
        Value::Float(f) => tagged("float", Json::String(format_float(*f))),
        Value::Boolean(b) => tagged("bool", Json::String(b.to_string())),
        Value::Datetime(dt) => tagged("datetime", Json::String(dt.to_string())),
        Value::Array(arr) => tagged("array", Json::Array(arr.iter().map(tagged_value).collect())),
        Value::Table(t) => Json::Object(tagged_table(t)),
        Value::TableArray(ta) => {
            Json::Array(ta.iter().map(|t| Json::Object(tagged_table(t))).collect())
        }
    }
}
