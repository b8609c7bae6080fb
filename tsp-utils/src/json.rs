use serde::{de::DeserializeOwned, Serialize};
use serde_json::{to_string, to_value, Map, Value};

pub fn dejsonify<T>(json_str: &str) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted, so reports and configs diff cleanly.
pub fn jsonify<T>(obj: &T) -> String
where
    T: Serialize,
{
    to_string(&jsonify_internal(
        &to_value(obj).expect("to_value failed on serializable object"),
    ))
    .expect("to_string failed on serializable object")
}

pub fn jsonify_internal(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut sorted_map = Map::new();
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), jsonify_internal(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(items) => Value::Array(items.iter().map(jsonify_internal).collect()),
        _ => json_value.clone(),
    }
}
