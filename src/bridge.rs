//! Bridge between the host's hook pipeline and hookify rules
//!
//! One invocation per tool call: parse the tool call, load the rules this
//! bridge owns, evaluate them and turn the result into an exit code. Exit
//! code 2 with a stderr message is how the host receives feedback.

use std::io::Write;
use std::path::Path;

use log::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{Config, RuleSource};
use crate::engine::RuleEngine;
use crate::input::{EventKind, HookInput};
use crate::notify::UserSink;
use crate::output::{EngineResult, Verdict, DEFAULT_BLOCK_MESSAGE};
use crate::rules::loader::{self, LoadError};
use crate::rules::Rule;

/// Tool call may proceed, nothing to report
pub const EXIT_ALLOW: u8 = 0;

/// Rules could not be loaded
pub const EXIT_FATAL: u8 = 1;

/// Feedback for the host: block (pre) or warning (post)
pub const EXIT_FEEDBACK: u8 = 2;

/// Flag selecting post-execution mode
pub const POST_FLAG: &str = "--post";

/// When the bridge runs relative to the tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// PreToolUse: can block
    Pre,
    /// PostToolUse: can only warn
    Post,
}

impl Mode {
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        if args.iter().any(|a| a.as_ref() == POST_FLAG) {
            Mode::Post
        } else {
            Mode::Pre
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pre => "pre",
            Mode::Post => "post",
        }
    }
}

/// Errors that abort the bridge. The host sees exit code 1, not 2.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to load rules: {0}")]
    Load(#[from] LoadError),
}

/// Engine result plus how many rules produced it
#[derive(Debug)]
pub struct Evaluation {
    pub result: EngineResult,
    pub rules: usize,
}

/// Turn an engine result into the verdict for the given mode
pub fn verdict_for(result: &EngineResult, mode: Mode) -> Verdict {
    match mode {
        Mode::Post if result.is_warn() => Verdict::Warn {
            message: result.system_message.clone().unwrap_or_default(),
        },
        Mode::Pre if result.is_block() => Verdict::Block {
            message: result
                .system_message
                .clone()
                .unwrap_or_else(|| DEFAULT_BLOCK_MESSAGE.to_string()),
        },
        _ => Verdict::Allow,
    }
}

/// Emit a verdict and return the exit code for it.
///
/// Blocks go to the user (terminal, else stdout) and to the model (stderr).
/// Warnings go to the model only.
pub fn deliver(verdict: &Verdict, tty_path: &Path) -> u8 {
    match verdict {
        Verdict::Allow => EXIT_ALLOW,
        Verdict::Warn { message } => {
            write_stderr(message);
            EXIT_FEEDBACK
        }
        Verdict::Block { message } => {
            UserSink::acquire(tty_path).notify_blocked(message);
            write_stderr(message);
            EXIT_FEEDBACK
        }
    }
}

fn write_stderr(message: &str) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "{}", message);
    let _ = handle.flush();
}

/// The bridge, configured once at process start
pub struct Bridge {
    config: Config,
    engine: RuleEngine,
}

impl Bridge {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            engine: RuleEngine::new(),
        }
    }

    /// Load the rules this bridge owns for an event
    pub fn load_rules(&self, event: EventKind) -> Result<Vec<Rule>, LoadError> {
        let rules_dir = self.config.rules_dir();
        match self.config.general.rule_source {
            RuleSource::DisabledOnly => loader::load_bridge_rules(&rules_dir, event.as_str()),
            RuleSource::All => loader::load_rules(Some(event.as_str()), &rules_dir),
        }
    }

    /// Evaluate the applicable rules against one tool call
    pub fn evaluate(&self, input: &HookInput) -> Result<Evaluation, BridgeError> {
        let event = input.event_kind();
        let rules = self.load_rules(event)?;
        debug!(
            "evaluating {} {} rule(s) for {}",
            rules.len(),
            event.as_str(),
            input.tool_name
        );

        let result = self.engine.evaluate_rules(&rules, &input.to_record());
        Ok(Evaluation {
            result,
            rules: rules.len(),
        })
    }

    /// Decide what to do with one tool call, without any output
    pub fn decide(&self, input: &HookInput, mode: Mode) -> Result<Verdict, BridgeError> {
        let evaluation = self.evaluate(input)?;
        Ok(verdict_for(&evaluation.result, mode))
    }

    /// Full invocation: raw stdin in, exit code out.
    ///
    /// Input that is not a JSON object is ignored (exit 0, no output).
    pub fn run(&self, stdin: &str, mode: Mode) -> Result<u8, BridgeError> {
        let input = match HookInput::from_json(stdin) {
            Ok(input) => input,
            Err(e) => {
                debug!("ignoring unparsable hook input: {}", e);
                return Ok(EXIT_ALLOW);
            }
        };

        let evaluation = self.evaluate(&input)?;
        let verdict = verdict_for(&evaluation.result, mode);
        self.audit(&input, mode, evaluation.rules, &verdict);

        Ok(deliver(&verdict, &self.config.tty_path()))
    }

    fn audit(&self, input: &HookInput, mode: Mode, rules: usize, verdict: &Verdict) {
        let Some(path) = self.config.audit_path() else {
            return;
        };

        let mut logger = AuditLogger::new(Some(&path));
        if !logger.is_enabled() {
            warn!("cannot open audit log {}", path.display());
            return;
        }

        let entry = AuditEntry::new(input, mode, rules, verdict);
        if let Err(e) = logger.log(&entry) {
            warn!("failed to write audit log: {}", e);
        }
    }
}
