//! The engine's untyped key/value payloads.
//!
//! Every structure crosses the engine boundary as a JSON-shaped map keyed by
//! the engine's field names. Typed views are produced once here and used
//! everywhere else.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A native key/value payload.
pub type NativeBag = Map<String, Value>;

/// Build a typed view from a native payload.
pub fn read_bag<T: DeserializeOwned>(bag: &NativeBag) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(bag.clone()))
}

/// Write every field of `value` into `bag`, leaving keys `value` does not
/// model untouched.
pub fn write_bag<T: Serialize>(value: &T, bag: &mut NativeBag) -> Result<(), serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => {
            bag.extend(fields);
            Ok(())
        }
        other => Err(serde::ser::Error::custom(format!(
            "expected a key/value payload, got {other}"
        ))),
    }
}

/// Build a list of typed views from a native value that should be a list.
///
/// Returns `Ok(None)` when the engine reports anything but a list (it uses
/// `null` for "no results").
pub fn read_list<T: DeserializeOwned>(value: &Value) -> Result<Option<Vec<T>>, serde_json::Error> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(<T as serde::Deserialize>::deserialize)
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
