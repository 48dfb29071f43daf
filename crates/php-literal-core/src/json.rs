//! JSON projection of PHP values.
//!
//! This module converts between `PhpValue` and JSON using serde_json.
//! Enable the `serde` feature to use this module.

use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{json, Map, Value as JsonValue};

use crate::array::ArrayBuilder;
use crate::error::Result;
use crate::parser::from_str;
use crate::types::{ArrayKey, PhpValue};

/// Convert a PHP value to a JSON value.
///
/// # Mapping Rules
///
/// | PHP Type | JSON Type |
/// |----------|-----------|
/// | `null` | `null` |
/// | `bool` | `boolean` |
/// | `int` | `number` |
/// | `float` | `number` (`null` for NaN, `"Infinity"`/`"-Infinity"` for infinities) |
/// | `string` | `string` |
/// | list | `array` |
/// | map | `object`, integer keys as decimal strings, order preserved |
///
/// # Example
///
/// ```rust
/// use php_literal_core::{from_str, to_json};
///
/// let value = from_str("['name' => 'Alice', 'tags' => ['a', 'b']]").unwrap();
/// assert_eq!(
///     to_json(&value),
///     serde_json::json!({"name": "Alice", "tags": ["a", "b"]})
/// );
/// ```
pub fn to_json(value: &PhpValue) -> JsonValue {
    match value {
        PhpValue::Null => JsonValue::Null,
        PhpValue::Bool(b) => JsonValue::Bool(*b),
        PhpValue::Int(i) => json!(*i),
        PhpValue::Float(f) => float_to_json(*f),
        PhpValue::String(s) => JsonValue::String(s.to_string()),
        PhpValue::List(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        PhpValue::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (k, v) in entries {
                map.insert(key_string(k).into_owned(), to_json(v));
            }
            JsonValue::Object(map)
        }
    }
}

fn float_to_json(f: f64) -> JsonValue {
    if f.is_nan() {
        JsonValue::Null
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            json!("Infinity")
        } else {
            json!("-Infinity")
        }
    } else {
        json!(f)
    }
}

fn key_string<'k>(key: &'k ArrayKey<'_>) -> Cow<'k, str> {
    match key {
        ArrayKey::Int(i) => Cow::Owned(i.to_string()),
        ArrayKey::String(s) => Cow::Borrowed(s.as_ref()),
    }
}

/// Convert a JSON value to a PHP value.
///
/// Integers that fit in `i64` become `Int`, every other number `Float`.
/// Objects go through the same key casting and List/Map decision as parsed
/// arrays, so `{"0": "a", "1": "b"}` becomes a list.
///
/// # Example
///
/// ```rust
/// use php_literal_core::{from_json, serialize};
///
/// let json = serde_json::json!({"id": 7, "tags": ["x"]});
/// let value = from_json(&json);
/// assert_eq!(serialize(&value), r#"a:2:{s:2:"id";i:7;s:4:"tags";a:1:{i:0;s:1:"x";}}"#);
/// ```
pub fn from_json(value: &JsonValue) -> PhpValue<'static> {
    match value {
        JsonValue::Null => PhpValue::Null,
        JsonValue::Bool(b) => PhpValue::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => PhpValue::Int(i),
            None => n.as_f64().map_or(PhpValue::Null, PhpValue::Float),
        },
        JsonValue::String(s) => PhpValue::String(Cow::Owned(s.clone())),
        JsonValue::Array(items) => PhpValue::List(items.iter().map(from_json).collect()),
        JsonValue::Object(map) => {
            let mut builder = ArrayBuilder::with_capacity(map.len());
            for (k, v) in map {
                builder.insert(ArrayKey::from_string(Cow::Owned(k.clone())), from_json(v));
            }
            builder.finish()
        }
    }
}

impl Serialize for PhpValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PhpValue::Null => serializer.serialize_unit(),
            PhpValue::Bool(b) => serializer.serialize_bool(*b),
            PhpValue::Int(i) => serializer.serialize_i64(*i),
            PhpValue::Float(f) => {
                if f.is_nan() {
                    serializer.serialize_unit()
                } else if f.is_infinite() {
                    serializer.serialize_str(if f.is_sign_positive() { "Infinity" } else { "-Infinity" })
                } else {
                    serializer.serialize_f64(*f)
                }
            }
            PhpValue::String(s) => serializer.serialize_str(s),
            PhpValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            PhpValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for ArrayKey<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&key_string(self))
    }
}

/// Convert a PHP value to a minified JSON string.
///
/// # Example
///
/// ```rust
/// use php_literal_core::{from_str, json::to_json_string};
///
/// let value = from_str("array('b' => 1, 'a' => [1.5, null])").unwrap();
/// assert_eq!(to_json_string(&value).unwrap(), r#"{"b":1,"a":[1.5,null]}"#);
/// ```
pub fn to_json_string(value: &PhpValue) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Convert a PHP value to a JSON string pretty-printed with two-space indent.
pub fn to_json_string_pretty(value: &PhpValue) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Parse a PHP literal and render it as JSON in one step.
///
/// Serializing a parsed tree to JSON cannot fail, so only parse errors are
/// reported.
pub fn php_to_json(input: &str, pretty: bool) -> Result<String> {
    let value = from_str(input)?;
    let json = to_json(&value);
    Ok(if pretty {
        format!("{:#}", json)
    } else {
        json.to_string()
    })
}
