//! Hookify rule model
//!
//! A rule is a markdown file whose YAML frontmatter holds the match
//! configuration and whose body is the message shown when the rule fires.

pub mod loader;

use serde::Deserialize;

/// Event scope a rule applies to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleEvent {
    Bash,
    File,
    Stop,
    Prompt,
    #[default]
    All,
    /// Any event name hookify does not know about
    #[serde(other)]
    Other,
}

impl RuleEvent {
    /// Check whether this rule scope covers the requested event
    pub fn covers(&self, event: &str) -> bool {
        match self {
            RuleEvent::All => true,
            RuleEvent::Other => false,
            scoped => scoped.as_str() == event,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleEvent::Bash => "bash",
            RuleEvent::File => "file",
            RuleEvent::Stop => "stop",
            RuleEvent::Prompt => "prompt",
            RuleEvent::All => "all",
            RuleEvent::Other => "other",
        }
    }
}

/// What happens when a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Block,
    /// Anything that is not `block` only warns
    #[default]
    #[serde(other)]
    Warn,
}

/// Comparison applied between a field value and a condition pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[default]
    RegexMatch,
    Contains,
    Equals,
    NotContains,
    StartsWith,
    EndsWith,
    /// Unknown operators never match
    #[serde(other)]
    Unknown,
}

/// A single field check inside a rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Condition {
    /// Field to extract from the tool input (e.g. "command", "file_path")
    pub field: String,

    #[serde(default)]
    pub operator: Operator,

    pub pattern: String,
}

impl Condition {
    pub fn regex(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: Operator::RegexMatch,
            pattern: pattern.into(),
        }
    }
}

/// Raw frontmatter as written by the user
#[derive(Debug, Clone, Deserialize)]
pub struct RuleFrontmatter {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default, rename = "bridgeEnabled", alias = "bridge_enabled")]
    pub bridge_enabled: Option<bool>,

    #[serde(default)]
    pub event: RuleEvent,

    #[serde(default)]
    pub action: RuleAction,

    /// Legacy single-regex form
    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub tool_matcher: Option<String>,
}

/// A parsed hookify rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,

    /// Enforced by the host's hookify plugin
    pub enabled: bool,

    /// Enforced by this bridge (only while `enabled` is false)
    pub bridge_enabled: bool,

    pub event: RuleEvent,
    pub action: RuleAction,
    pub pattern: Option<String>,
    pub conditions: Vec<Condition>,
    pub tool_matcher: Option<String>,

    /// Markdown body shown when the rule fires
    pub message: String,
}

impl Rule {
    /// Build a rule from parsed frontmatter and the markdown body.
    ///
    /// A legacy `pattern` without explicit conditions becomes a single
    /// `regex_match` condition on the field that fits the event.
    pub fn from_frontmatter(frontmatter: RuleFrontmatter, message: &str) -> Self {
        let RuleFrontmatter {
            name,
            enabled,
            bridge_enabled,
            event,
            action,
            pattern,
            mut conditions,
            tool_matcher,
        } = frontmatter;

        if conditions.is_empty() {
            if let Some(ref pattern) = pattern {
                let field = match event {
                    RuleEvent::Bash => "command",
                    RuleEvent::File => "new_text",
                    _ => "content",
                };
                conditions.push(Condition::regex(field, pattern.clone()));
            }
        }

        Self {
            name: name.unwrap_or_else(|| "unnamed".to_string()),
            enabled: enabled.unwrap_or(true),
            bridge_enabled: bridge_enabled.unwrap_or(true),
            event,
            action,
            pattern,
            conditions,
            tool_matcher,
            message: message.trim().to_string(),
        }
    }

    /// Eligible for the bridge: hidden from the host but not fully disabled
    pub fn is_bridge_eligible(&self) -> bool {
        !self.enabled && self.bridge_enabled
    }

    pub fn is_blocking(&self) -> bool {
        self.action == RuleAction::Block
    }
}
