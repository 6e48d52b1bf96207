use crate::models::submission_models::Fields;
use serde_json::Value;

/// Parses `key=value` pairs into a form field set. A value that is valid JSON
/// (`500`, `true`, `"x"`) keeps its JSON type; anything else is a string.
pub fn parse_field_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Fields, String> {
    let mut fields = Fields::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Field '{}' is not in key=value form.", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("Field '{}' has an empty name.", pair));
        }
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}
