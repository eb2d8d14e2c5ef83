//! Configuration loading for hookify-bridge
//!
//! Supports TOML configuration with embedded defaults.

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Which rule files the bridge enforces.
///
/// The bridge and the hookify plugin must never both enforce the same rule,
/// so exactly one of them owns each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSource {
    /// Rules with `enabled: false` and `bridgeEnabled: true`; the plugin keeps
    /// the enabled ones
    #[default]
    DisabledOnly,

    /// Every enabled rule; the plugin must be turned off
    All,
}

impl RuleSource {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "disabled-only" | "disabled_only" => Some(RuleSource::DisabledOnly),
            "all" => Some(RuleSource::All),
            _ => None,
        }
    }
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Which rules the bridge loads
    pub rule_source: RuleSource,

    /// Directory holding `hookify.*.local.md` files
    pub rules_dir: Option<String>,

    /// Interactive terminal used for block banners
    pub tty_path: String,

    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            rule_source: RuleSource::DisabledOnly,
            rules_dir: None,
            tty_path: "/dev/tty".to_string(),
            audit_log: false,
            audit_path: Some("~/.claude/hookify-bridge/audit.jsonl".to_string()),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Self {
        let config_paths = [
            dirs::home_dir().map(|p| p.join(".claude/hookify-bridge/config.toml")),
            Some(PathBuf::from("/etc/hookify-bridge/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => warn!("failed to load {}: {}", path.display(), e),
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Rules directory: configured path, else `$CLAUDE_PROJECT_DIR/.claude`,
    /// else `.claude` under the working directory
    pub fn rules_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.general.rules_dir {
            return Self::expand_path(dir);
        }

        match std::env::var_os("CLAUDE_PROJECT_DIR") {
            Some(project) if !project.is_empty() => PathBuf::from(project).join(".claude"),
            _ => PathBuf::from(".claude"),
        }
    }

    /// Get the audit log path (expanded), `None` when auditing is off
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_ref().map(|p| Self::expand_path(p))
    }

    pub fn tty_path(&self) -> PathBuf {
        Self::expand_path(&self.general.tty_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
rule_source = "disabled-only"
tty_path = "/dev/tty"
audit_log = false
audit_path = "~/.claude/hookify-bridge/audit.jsonl"
"#;
