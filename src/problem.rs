//! Failure body returned by the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a non-success response.
///
/// Some endpoints answer `{"error": "..."}`, others `{"errors": ...}` where
/// `errors` is a string, a list of strings, or an object mapping field names
/// to messages. Both fields are optional so every variant parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Plain-text error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Structured error payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl Problem {
    /// Flattened, human-readable message, if the body carried any.
    pub fn message(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(error) = self
            .error
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        {
            parts.push(error.to_string());
        }
        if let Some(errors) = &self.errors {
            flatten(None, errors, &mut parts);
        }
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

fn flatten(field: Option<&str>, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(message) => out.push(match field {
            Some(field) => format!("{field}: {message}"),
            None => message.clone(),
        }),
        Value::Array(items) => {
            for item in items {
                flatten(field, item, out);
            }
        }
        Value::Object(entries) => {
            for (key, item) in entries {
                let nested = match field {
                    Some(field) => format!("{field}.{key}"),
                    None => key.clone(),
                };
                flatten(Some(&nested), item, out);
            }
        }
        other => out.push(match field {
            Some(field) => format!("{field}: {other}"),
            None => other.to_string(),
        }),
    }
}
