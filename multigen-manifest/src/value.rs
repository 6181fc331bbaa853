//! Conversion of TOML values into JSON for template contexts.

use serde_json::{Map, Value as Json};
use toml::Value;

/// Convert a TOML value into JSON. Datetimes become their TOML text form.
pub fn toml_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Integer(i) => Json::from(*i),
        Value::Float(f) => Json::from(*f),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Datetime(datetime) => Json::String(datetime.to_string()),
        Value::Array(items) => Json::Array(items.iter().map(toml_to_json).collect()),
        Value::Table(table) => Json::Object(table_to_json(table)),
    }
}

/// Convert every entry of a TOML table, keeping key order.
pub fn table_to_json(table: &toml::Table) -> Map<String, Json> {
    table
        .iter()
        .map(|(key, value)| (key.clone(), toml_to_json(value)))
        .collect()
}
