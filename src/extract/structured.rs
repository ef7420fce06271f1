use serde_json::Value;
use tracing::trace;

/// Every string (keys included) inside a JSON document.
///
/// A document that does not parse yields nothing; it is not an error for the pass.
pub(super) fn embedded_paths(text: &str) -> Vec<String> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            trace!("Skipping structured-data scan: {}", e);
            return Vec::new();
        }
    };

    let mut strings = Vec::new();
    collect_strings(&value, &mut strings);
    strings
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                out.push(key.clone());
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}
