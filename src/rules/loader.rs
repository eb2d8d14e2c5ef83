//! Rule file discovery and parsing
//!
//! Rules live next to the project's `.claude` settings as
//! `hookify.<name>.local.md` files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{Rule, RuleFrontmatter};

/// Filename pattern for rule files inside the rules directory
pub const RULE_FILE_PATTERN: &str = "hookify.*.local.md";

/// Errors that make the whole rule set unavailable
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("rules directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("invalid rule file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("cannot read rules directory: {0}")]
    Unreadable(#[from] glob::GlobError),
}

/// Split markdown content into YAML frontmatter and body.
///
/// Returns `None` when the content does not open with a `---` block.
pub fn extract_frontmatter(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with("---") {
        return None;
    }

    let mut parts = content.splitn(3, "---");
    parts.next()?;
    let frontmatter = parts.next()?;
    let body = parts.next()?;
    Some((frontmatter, body.trim()))
}

/// Parse rule file content. `source` is only used in log messages.
pub fn parse_rule(content: &str, source: &str) -> Option<Rule> {
    let (frontmatter, body) = match extract_frontmatter(content) {
        Some(split) if !split.0.trim().is_empty() => split,
        _ => {
            warn!("{} has no frontmatter, skipping", source);
            return None;
        }
    };

    match serde_yaml::from_str::<RuleFrontmatter>(frontmatter) {
        Ok(parsed) => Some(Rule::from_frontmatter(parsed, body)),
        Err(e) => {
            warn!("failed to parse frontmatter in {}: {}", source, e);
            None
        }
    }
}

/// Load a single rule file. Unreadable or malformed files yield `None`.
pub fn load_rule_file(path: &Path) -> Option<Rule> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("cannot read rule file {}: {}", path.display(), e);
            return None;
        }
    };

    parse_rule(&content, &path.display().to_string())
}

/// Rule files in `rules_dir`, sorted by path
pub fn discover_rule_files(rules_dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !rules_dir.is_dir() {
        return Err(LoadError::MissingDirectory(rules_dir.to_path_buf()));
    }

    // The directory part is literal; only the file name is a pattern
    let escaped_dir = glob::Pattern::escape(&rules_dir.to_string_lossy());
    let pattern = Path::new(&escaped_dir).join(RULE_FILE_PATTERN);
    let mut files = glob::glob(&pattern.to_string_lossy())?.collect::<Result<Vec<_>, _>>()?;
    files.sort();

    debug!("found {} rule files in {}", files.len(), rules_dir.display());
    Ok(files)
}

fn load_filtered<F>(rules_dir: &Path, keep: F) -> Result<Vec<Rule>, LoadError>
where
    F: Fn(&Rule) -> bool,
{
    let rules = discover_rule_files(rules_dir)?
        .iter()
        .filter_map(|path| load_rule_file(path))
        .filter(|rule| keep(rule))
        .collect();
    Ok(rules)
}

/// Load the rules the host's hookify plugin would enforce.
///
/// Only `enabled` rules are returned. When `event` is given, rules scoped to
/// a different event are dropped.
pub fn load_rules(event: Option<&str>, rules_dir: &Path) -> Result<Vec<Rule>, LoadError> {
    load_filtered(rules_dir, |rule| {
        rule.enabled && event.map_or(true, |event| rule.event.covers(event))
    })
}

/// Load the rules this bridge is responsible for.
///
/// A rule qualifies when the host skips it (`enabled: false`) but it has not
/// been switched off entirely (`bridgeEnabled` still true), and its event
/// scope covers `event`.
pub fn load_bridge_rules(rules_dir: &Path, event: &str) -> Result<Vec<Rule>, LoadError> {
    load_filtered(rules_dir, |rule| {
        rule.is_bridge_eligible() && rule.event.covers(event)
    })
}
