//! Field extraction for rule conditions
//!
//! Conditions name a field (`command`, `file_path`, `new_text`, ...). Keys
//! present in `tool_input` are used directly; the rest are tool-specific
//! aliases.

use serde_json::Value;

use crate::input::HookRecord;

/// Render a tool input value as condition text
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract the value a condition compares against.
///
/// Returns `None` when the field does not exist for this tool, which makes
/// the condition fail.
pub fn extract_field(field: &str, record: &HookRecord) -> Option<String> {
    if let Some(value) = record.input_field(field) {
        return Some(value_text(value));
    }

    // Event-level fields the bridge never carries
    if matches!(field, "reason" | "user_prompt" | "transcript") {
        return Some(String::new());
    }

    let input = |key: &str| record.input_str(key).to_string();

    match record.tool_name.as_str() {
        "Bash" => match field {
            "command" => Some(input("command")),
            _ => None,
        },
        "Write" | "Edit" => match field {
            "content" => {
                let content = record.input_field("content").and_then(Value::as_str);
                match content {
                    Some(content) if !content.is_empty() => Some(content.to_string()),
                    _ => Some(input("new_string")),
                }
            }
            "new_text" | "new_string" => Some(input("new_string")),
            "old_text" | "old_string" => Some(input("old_string")),
            "file_path" => Some(input("file_path")),
            _ => None,
        },
        "MultiEdit" => match field {
            "file_path" => Some(input("file_path")),
            "new_text" | "content" => Some(multi_edit_text(record)),
            _ => None,
        },
        _ => None,
    }
}

/// All `new_string` values of a MultiEdit, space separated
fn multi_edit_text(record: &HookRecord) -> String {
    record
        .input_field("edits")
        .and_then(Value::as_array)
        .map(|edits| {
            edits
                .iter()
                .map(|edit| edit.get("new_string").and_then(Value::as_str).unwrap_or(""))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
