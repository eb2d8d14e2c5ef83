//! Rule engine results and the verdict the bridge acts on
//!
//! `EngineResult` mirrors the JSON a hookify hook would print, so it can be
//! serialized for debugging and compared against the host plugin.

use serde::Serialize;

/// Message used when a deny carries no text
pub const DEFAULT_BLOCK_MESSAGE: &str = "Blocked by hookify rule";

/// Permission decision inside `hookSpecificOutput`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    Allow,
    Deny,
}

/// Hook-specific output with permission decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    #[serde(rename = "permissionDecision")]
    pub permission_decision: PermissionDecision,
}

/// Output of one rule evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineResult {
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// Stop-hook decision ("block")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    /// Stop-hook reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EngineResult {
    /// Nothing matched
    pub fn allow() -> Self {
        Self::default()
    }

    /// Deny a tool call for the given hook event
    pub fn deny(hook_event_name: &str, message: String) -> Self {
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: hook_event_name.to_string(),
                permission_decision: PermissionDecision::Deny,
            }),
            system_message: Some(message),
            ..Self::default()
        }
    }

    /// Block a Stop event
    pub fn block_stop(message: String) -> Self {
        Self {
            decision: Some("block".to_string()),
            reason: Some(message.clone()),
            system_message: Some(message),
            ..Self::default()
        }
    }

    /// Message only, no permission outcome
    pub fn message(message: String) -> Self {
        Self {
            system_message: Some(message),
            ..Self::default()
        }
    }

    /// The result carries an explicit deny
    pub fn is_block(&self) -> bool {
        self.hook_specific_output
            .as_ref()
            .is_some_and(|out| out.permission_decision == PermissionDecision::Deny)
    }

    /// The result carries a message but no permission outcome
    pub fn is_warn(&self) -> bool {
        self.system_message.as_deref().is_some_and(|m| !m.is_empty())
            && self.hook_specific_output.is_none()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// What the bridge does with the current tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Let the call proceed silently
    Allow,

    /// Stop the call; shown to the user and the model
    Block { message: String },

    /// Feedback to the model after the call ran
    Warn { message: String },
}

impl Verdict {
    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Allow => None,
            Verdict::Block { message } | Verdict::Warn { message } => Some(message),
        }
    }
}
