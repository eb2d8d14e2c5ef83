//! hookify-bridge - Native hook bridge for hookify rules
//!
//! Runs hookify rules as a plain command hook so that blocks reach both the
//! user and the model (stderr + exit code 2), and post-execution warnings
//! reach the model.
//!
//! # Features
//!
//! - **Rule loading**: `hookify.*.local.md` files with YAML frontmatter
//! - **Rule ownership**: enforce only rules the hookify plugin skips
//!   (`enabled: false`, `bridgeEnabled: true`), or every enabled rule
//! - **Rule engine**: regex and string conditions, tool matchers,
//!   block-over-warn precedence
//! - **Dual-channel blocks**: terminal banner for the user, stderr for the model
//! - **Audit logging**: optional JSONL log of all verdicts
//!
//! # Example
//!
//! ```
//! use hookify_bridge::{HookInput, RuleEngine};
//! use hookify_bridge::rules::loader::parse_rule;
//!
//! let rule = parse_rule(
//!     "---\nname: no-rm\nevent: bash\naction: block\npattern: rm\\s+-rf\n---\nNo recursive deletes.",
//!     "inline",
//! )
//! .unwrap();
//!
//! let input = HookInput::from_json(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#).unwrap();
//! let result = RuleEngine::new().evaluate_rules(&[rule], &input.to_record());
//! assert!(result.is_block());
//! ```

pub mod audit;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod input;
pub mod notify;
pub mod output;
pub mod rules;

// Re-exports for convenience
pub use bridge::{Bridge, BridgeError, Mode};
pub use config::{Config, RuleSource};
pub use engine::RuleEngine;
pub use input::{EventKind, HookInput, HookRecord};
pub use output::{EngineResult, Verdict};
pub use rules::{Condition, Rule};
