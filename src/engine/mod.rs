//! Rule engine for hookify rules
//!
//! Evaluates a rule set against one tool invocation. Blocking rules take
//! precedence over warnings; every matching rule of the winning kind
//! contributes its message.

pub mod fields;
pub mod matcher;

use log::debug;

use crate::input::HookRecord;
use crate::output::EngineResult;
use crate::rules::{Condition, Rule};

/// Stateless evaluator for hookify rules
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `rules` against `record` and build the hook result
    pub fn evaluate_rules(&self, rules: &[Rule], record: &HookRecord) -> EngineResult {
        let (blocking, warning): (Vec<&Rule>, Vec<&Rule>) = rules
            .iter()
            .filter(|rule| self.rule_matches(rule, record))
            .partition(|rule| rule.is_blocking());

        if !blocking.is_empty() {
            let message = combine_messages(&blocking);
            debug!("{} blocking rule(s) matched {}", blocking.len(), record.tool_name);
            return match record.hook_event_name.as_str() {
                "Stop" => EngineResult::block_stop(message),
                event @ ("PreToolUse" | "PostToolUse") => EngineResult::deny(event, message),
                _ => EngineResult::message(message),
            };
        }

        if !warning.is_empty() {
            debug!("{} warning rule(s) matched {}", warning.len(), record.tool_name);
            return EngineResult::message(combine_messages(&warning));
        }

        EngineResult::allow()
    }

    /// A rule matches when its tool matcher accepts the tool and every
    /// condition holds. Rules without conditions never match.
    pub fn rule_matches(&self, rule: &Rule, record: &HookRecord) -> bool {
        if let Some(ref tool_matcher) = rule.tool_matcher {
            if !matcher::matches_tool(tool_matcher, &record.tool_name) {
                return false;
            }
        }

        if rule.conditions.is_empty() {
            return false;
        }

        rule.conditions
            .iter()
            .all(|condition| self.check_condition(condition, record))
    }

    pub fn check_condition(&self, condition: &Condition, record: &HookRecord) -> bool {
        match fields::extract_field(&condition.field, record) {
            Some(value) => matcher::check_operator(condition, &value),
            None => false,
        }
    }
}

fn combine_messages(rules: &[&Rule]) -> String {
    rules
        .iter()
        .map(|rule| format!("**[{}]**\n{}", rule.name, rule.message))
        .collect::<Vec<_>>()
        .join("\n\n")
}
