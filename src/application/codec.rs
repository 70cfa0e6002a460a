//! Conversion between localization trees and JSON
//!
//! Objects map to categories, arrays of strings to arrays, strings to strings.
//! A `null` document (or an empty one) is an empty category. Any other shape is
//! rejected.

use serde_json::{Map, Value};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::LocalizationNode;

/// Convert a JSON value into a tree.
pub fn decode_value(value: Value) -> ApplicationResult<LocalizationNode> {
    match value {
        Value::Null => Ok(LocalizationNode::empty_category()),
        other => decode_child(other, "<root>"),
    }
}

fn decode_child(value: Value, name: &str) -> ApplicationResult<LocalizationNode> {
    match value {
        Value::String(s) => Ok(LocalizationNode::String(s)),
        Value::Object(map) => {
            let children = map
                .into_iter()
                .map(|(key, child)| {
                    let node = decode_child(child, &key)?;
                    Ok((key, node))
                })
                .collect::<ApplicationResult<_>>()?;
            Ok(LocalizationNode::Category(children))
        }
        Value::Array(items) => {
            let strings = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(ApplicationError::codec(format!(
                        "array \"{}\" may only contain strings, found {}",
                        name, other
                    ))),
                })
                .collect::<ApplicationResult<_>>()?;
            Ok(LocalizationNode::Array(strings))
        }
        other => Err(ApplicationError::codec(format!(
            "unsupported value for \"{}\": {}",
            name, other
        ))),
    }
}

/// Convert a tree into a JSON value.
pub fn encode_value(node: &LocalizationNode) -> Value {
    match node {
        LocalizationNode::String(s) => Value::String(s.clone()),
        LocalizationNode::Array(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        LocalizationNode::Category(children) => Value::Object(
            children
                .iter()
                .map(|(name, child)| (name.clone(), encode_value(child)))
                .collect::<Map<_, _>>(),
        ),
    }
}

/// Parse JSON text into a tree. Blank text is an empty category.
pub fn decode(text: &str) -> ApplicationResult<LocalizationNode> {
    if text.trim().is_empty() {
        return Ok(LocalizationNode::empty_category());
    }
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

/// Render a tree as indented JSON text.
pub fn encode(node: &LocalizationNode) -> ApplicationResult<String> {
    Ok(serde_json::to_string_pretty(&encode_value(node))?)
}
