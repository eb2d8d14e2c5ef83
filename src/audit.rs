//! JSONL audit logging for hookify-bridge
//!
//! Records every bridge verdict to a JSONL file for later analysis.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::bridge::Mode;
use crate::input::HookInput;
use crate::output::Verdict;

/// Credential-looking substrings removed from logged input summaries
static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(api[_-]?key|secret[_-]?key|access[_-]?token)\s*[=:]\s*['\x22]?[a-zA-Z0-9_\-]{16,}",
        r"AKIA[0-9A-Z]{16}",
        r"gh[pousr]_[A-Za-z0-9_]{36,}",
        r"github_pat_[A-Za-z0-9_]{22,}",
        r"(?i)(password|passwd|pwd)\s*[=:]\s*['\x22][^'\x22]+['\x22]",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// Redact secrets in text for logging
pub fn redact_secrets(text: &str) -> String {
    SECRET_PATTERNS.iter().fold(text.to_string(), |acc, pattern| {
        pattern.replace_all(&acc, "[REDACTED]").into_owned()
    })
}

/// Log level for audit entries
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Warned,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    /// ALLOWED, BLOCKED or WARNED
    pub level: LogLevel,

    /// "pre" or "post"
    pub mode: &'static str,

    pub tool: String,

    /// Rule event the tool was classified as
    pub event: &'static str,

    /// Number of rules evaluated
    pub rules: usize,

    /// Summary of the input, secrets redacted
    pub input_summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    pub fn new(input: &HookInput, mode: Mode, rules: usize, verdict: &Verdict) -> Self {
        let level = match verdict {
            Verdict::Allow => LogLevel::Allowed,
            Verdict::Block { .. } => LogLevel::Blocked,
            Verdict::Warn { .. } => LogLevel::Warned,
        };

        Self {
            timestamp: Utc::now(),
            level,
            mode: mode.as_str(),
            tool: input.tool_name.clone(),
            event: input.event_kind().as_str(),
            rules,
            input_summary: redact_secrets(&input.summary()),
            message: verdict.message().map(String::from),
            session_id: input.session_id.clone(),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
