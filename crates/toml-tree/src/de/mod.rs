//! serde::Deserializer implementation backed by the document tree

use serde::de::{self, DeserializeOwned, IntoDeserializer, MapAccess, SeqAccess};

use crate::table::{Document, Table};
use crate::value::Value;
use crate::{Error, Result};

#[derive(Debug)]
pub struct DeError {
    msg: String,
}

impl core::fmt::Display for DeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl de::Error for DeError {
    fn custom<T: core::fmt::Display>(t: T) -> Self {
        DeError {
            msg: format!("{}", t),
        }
    }
}

impl core::error::Error for DeError {}

pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }
}

struct SeqDeserializer<I> {
    elems: I,
}

impl<'de, I: Iterator<Item = Value>> SeqAccess<'de> for SeqDeserializer<I> {
    type Error = DeError;

    fn next_element_seed<T>(&mut self, seed: T) -> core::result::Result<Option<T::Value>, DeError>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.elems.next() {
            Some(value) => seed.deserialize(Deserializer { value }).map(Some),
            None => Ok(None),
        }
    }
}

struct MapDeserializer {
    entries: indexmap::map::IntoIter<String, Value>,
    next_val: Option<Value>,
}

impl<'de> MapAccess<'de> for MapDeserializer {
    type Error = DeError;

    fn next_key_seed<K>(&mut self, seed: K) -> core::result::Result<Option<K::Value>, DeError>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.entries.next() {
            Some((key, val)) => {
                self.next_val = Some(val);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<VV>(&mut self, seed: VV) -> core::result::Result<VV::Value, DeError>
    where
        VV: de::DeserializeSeed<'de>,
    {
        let value = self
            .next_val
            .take()
            .ok_or_else(|| <DeError as de::Error>::custom("value requested before key"))?;
        seed.deserialize(Deserializer { value })
    }
}

fn visit_table<'de, V: de::Visitor<'de>>(
    table: Table,
    visitor: V,
) -> core::result::Result<V::Value, DeError> {
    visitor.visit_map(MapDeserializer {
        entries: table.into_iter(),
        next_val: None,
    })
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = DeError;

    fn deserialize_any<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_string(s),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Datetime(dt) => visitor.visit_string(dt.to_string()),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer {
                elems: arr.into_iter(),
            }),
            Value::Table(t) => visit_table(t, visitor),
            Value::TableArray(ta) => visitor.visit_seq(SeqDeserializer {
                elems: ta.into_iter().map(Value::Table),
            }),
        }
    }

    // Absent keys never reach the deserializer, so a present value is always `Some`.
    fn deserialize_option<V>(self, visitor: V) -> core::result::Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> core::result::Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(<DeError as de::Error>::custom(format!(
                "expected a string for an enum, found a {}",
                other.kind()
            ))),
        }
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> core::result::Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 char str string bytes byte_buf
        unit unit_struct seq tuple tuple_struct map struct identifier ignored_any
    }
}

/// Parses `s` and deserializes the resulting document into `T`.
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    let doc = crate::parse_str(s)?;
    from_document(doc)
}

/// Deserializes an already parsed (or programmatically built) document into `T`.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    let deser = Deserializer::from_value(Value::Table(doc));
    T::deserialize(deser).map_err(|e: DeError| Error::Message(e.msg))
}
