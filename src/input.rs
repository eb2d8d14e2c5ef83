//! Input parsing for the hook JSON the host sends on stdin

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Tool name classified as a file event; every other tool is a bash event
pub const READ_TOOL: &str = "Read";

/// Event name stamped on every record the bridge evaluates
pub const PRE_TOOL_USE: &str = "PreToolUse";

/// Tool invocation received from the host
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read")
    #[serde(default = "default_tool_name", deserialize_with = "tool_name_or_default")]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default = "empty_object")]
    pub tool_input: Value,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name the host reported (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

fn default_tool_name() -> String {
    "Bash".to_string()
}

/// `null` is treated like a missing tool name
fn tool_name_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_tool_name))
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Rule event category derived from the tool name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    File,
    Bash,
}

impl EventKind {
    pub fn from_tool_name(tool_name: &str) -> Self {
        if tool_name == READ_TOOL {
            EventKind::File
        } else {
            EventKind::Bash
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::File => "file",
            EventKind::Bash => "bash",
        }
    }
}

/// Normalized record handed to the rule engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookRecord {
    pub hook_event_name: String,
    pub tool_name: String,
    pub tool_input: Value,
}

impl HookRecord {
    pub fn new(
        hook_event_name: impl Into<String>,
        tool_name: impl Into<String>,
        tool_input: Value,
    ) -> Self {
        Self {
            hook_event_name: hook_event_name.into(),
            tool_name: tool_name.into(),
            tool_input,
        }
    }

    /// Look up a key in the tool input
    pub fn input_field(&self, field: &str) -> Option<&Value> {
        self.tool_input.get(field)
    }

    /// String value of a tool input key, empty when absent or not a string
    pub fn input_str(&self, field: &str) -> &str {
        self.input_field(field).and_then(Value::as_str).unwrap_or("")
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn event_kind(&self) -> EventKind {
        EventKind::from_tool_name(&self.tool_name)
    }

    /// The record rule evaluation sees: always a `PreToolUse` event
    pub fn to_record(&self) -> HookRecord {
        HookRecord::new(PRE_TOOL_USE, self.tool_name.clone(), self.tool_input.clone())
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        let detail = ["command", "file_path", "path", "pattern"]
            .iter()
            .find_map(|key| self.tool_input.get(*key).and_then(Value::as_str));

        match detail {
            Some(detail) => {
                let truncated: String = detail.chars().take(100).collect();
                let ellipsis = if detail.chars().count() > 100 { "..." } else { "" };
                format!("{}: {}{}", self.tool_name, truncated, ellipsis)
            }
            None => self.tool_name.clone(),
        }
    }
}
