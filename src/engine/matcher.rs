//! Condition operators and tool matching

use std::collections::HashMap;
use std::sync::Mutex;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::rules::{Condition, Operator};

/// A rule pattern compiled by whichever engine accepts it
enum CompiledPattern {
    /// Linear-time engine, used whenever the pattern allows it
    Plain(Regex),
    /// Backtracking engine for lookaround and backreferences
    Backtracking(fancy_regex::Regex),
}

impl CompiledPattern {
    fn is_match(&self, text: &str) -> bool {
        match self {
            CompiledPattern::Plain(regex) => regex.is_match(text),
            CompiledPattern::Backtracking(regex) => match regex.is_match(text) {
                Ok(matched) => matched,
                Err(e) => {
                    warn!("regex '{}' failed on input: {}", regex.as_str(), e);
                    false
                }
            },
        }
    }
}

/// Compiled patterns, `None` for patterns that failed to compile
static REGEX_CACHE: Lazy<Mutex<HashMap<String, Option<CompiledPattern>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

const REGEX_CACHE_LIMIT: usize = 128;

fn compile(pattern: &str) -> Option<CompiledPattern> {
    let error = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => return Some(CompiledPattern::Plain(regex)),
        Err(e) => e,
    };

    match fancy_regex::Regex::new(&format!("(?i){}", pattern)) {
        Ok(regex) => {
            debug!("pattern '{}' needs the backtracking engine", pattern);
            Some(CompiledPattern::Backtracking(regex))
        }
        Err(_) => {
            warn!("invalid regex pattern '{}': {}", pattern, error);
            None
        }
    }
}

/// Case-insensitive search. Invalid patterns never match.
pub fn regex_match(pattern: &str, text: &str) -> bool {
    let mut cache = match REGEX_CACHE.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };

    if !cache.contains_key(pattern) {
        if cache.len() >= REGEX_CACHE_LIMIT {
            cache.clear();
        }
        cache.insert(pattern.to_string(), compile(pattern));
    }

    cache
        .get(pattern)
        .and_then(Option::as_ref)
        .is_some_and(|compiled| compiled.is_match(text))
}

/// Apply a condition's operator to an extracted field value
pub fn check_operator(condition: &Condition, value: &str) -> bool {
    let pattern = condition.pattern.as_str();
    match condition.operator {
        Operator::RegexMatch => regex_match(pattern, value),
        Operator::Contains => value.contains(pattern),
        Operator::Equals => value == pattern,
        Operator::NotContains => !value.contains(pattern),
        Operator::StartsWith => value.starts_with(pattern),
        Operator::EndsWith => value.ends_with(pattern),
        Operator::Unknown => false,
    }
}

/// Check a `tool_matcher` expression: `*` or `Name|Other|...`
pub fn matches_tool(matcher: &str, tool_name: &str) -> bool {
    matcher == "*" || matcher.split('|').any(|name| name == tool_name)
}
