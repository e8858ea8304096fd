//! Argument clause rendering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::classify::Classification;

/// Call arguments in call-site order. `None` marks an absent value, which is
/// left out of the clause entirely (unlike `Some(Value::Null)`).
pub type Arguments = IndexMap<String, Option<Value>>;

/// Build [`Arguments`] from a JSON object. Other values give an empty map.
pub fn arguments_from_json(value: &Value) -> Arguments {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), Some(v.clone())))
            .collect(),
        _ => Arguments::new(),
    }
}

/// The three ways an argument value can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentStyle {
    /// Bare token, or `[a,b]` for sequences.
    Flag,
    /// Plain string coercion, no quoting.
    Enum,
    /// JSON-style literal.
    Plain,
}

impl ArgumentStyle {
    pub fn render(self, value: &Value) -> String {
        match self {
            ArgumentStyle::Flag => flag_token(value),
            ArgumentStyle::Enum => coerce(value),
            ArgumentStyle::Plain => literal(value),
        }
    }
}

fn flag_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let tokens: Vec<String> = items.iter().map(flag_token).collect();
            format!("[{}]", tokens.join(","))
        }
        Value::Object(_) => literal(value),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => literal(value),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

/// Strings are JSON-quoted; object keys stay bare so nested input objects
/// read as GraphQL object literals.
fn literal(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", parts.join(","))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}:{}", k, literal(v)))
                .collect();
            format!("{{{}}}", parts.join(","))
        }
        Value::String(_) | Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

/// `(key:value key:value)`, or an empty string when no argument is present.
pub fn render_arguments(args: &Arguments, classification: &Classification) -> String {
    let fragments: Vec<String> = args
        .iter()
        .filter_map(|(key, value)| {
            let value = value.as_ref()?;
            Some(format!("{}:{}", key, classification.style_of(key).render(value)))
        })
        .collect();

    if fragments.is_empty() {
        String::new()
    } else {
        format!("({})", fragments.join(" "))
    }
}
