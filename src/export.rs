// Author: Dustin Pilgrim
// License: MIT

use serde_json::json;

use crate::ast::Value;
use crate::config::Config;
use crate::HoconError;

/// Convert a value tree to its JSON equivalent.
///
/// - Strings, integers, booleans, null → direct mapping
/// - `Float32` → JSON number (non-finite values cannot occur after parsing)
/// - Arrays, objects → nested JSON structures, object key order preserved
/// - Unresolved substitutions → their canonical `${path}` / `${?path}` string
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Int(n) => json!(n),
        Value::Float32(n) => json!(f64::from(*n)),
        Value::Boolean(b) => json!(b),
        Value::Null => serde_json::Value::Null,
        Value::Array(values) => serde_json::Value::Array(values.iter().map(to_json).collect()),
        Value::Object(items) => serde_json::Value::Object(
            items
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
        Value::Substitution(sub) => json!(sub.to_string()),
    }
}

/// Export a resolved configuration as pretty-printed JSON.
///
/// # Examples
/// ```
/// use hocon_cfg::{Config, export};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::from_str("server.port = 8080")?;
/// let json = export::export_to_json(&config)?;
/// assert!(json.contains("\"port\": 8080"));
/// # Ok(())
/// # }
/// ```
pub fn export_to_json(config: &Config) -> Result<String, HoconError> {
    serde_json::to_string_pretty(&to_json(config.root())).map_err(|e| HoconError::TypeError {
        message: format!("could not serialize configuration: {}", e),
        hint: None,
        code: Some(421),
    })
}
