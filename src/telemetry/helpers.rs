use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Current UTC time in ISO 8601 format with millisecond precision
pub fn get_iso_time() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Recursively drop `null` values and `self` keys so they are not sent.
pub fn remove_unwanted_items(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, v)| !v.is_null() && k != "self")
                .map(|(k, v)| (k, remove_unwanted_items(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(remove_unwanted_items).collect()),
        other => other,
    }
}

pub fn safe_serialize<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    Ok(remove_unwanted_items(serde_json::to_value(value)?))
}
