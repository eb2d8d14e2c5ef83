//! hookify-bridge - Native hook bridge for hookify rules
//!
//! # Usage
//!
//! ```bash
//! # PreToolUse: block matching calls (exit 2, message on stderr and terminal)
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | hookify-bridge
//!
//! # PostToolUse: feed warnings back to the model
//! echo '{"tool_name":"Read","tool_input":{"file_path":"/etc/passwd"}}' | hookify-bridge --post
//! ```

use std::env;
use std::io::{self, Read};
use std::process::ExitCode;

use env_logger::Env;
use log::warn;

use hookify_bridge::{
    bridge::{Bridge, Mode, EXIT_FATAL},
    config::{Config, RuleSource},
};

/// Environment variable holding the log filter
const LOG_ENV: &str = "HOOKIFY_BRIDGE_LOG";

/// Print version information
fn print_version() {
    println!("hookify-bridge {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"hookify-bridge - Native hook bridge for hookify rules

USAGE:
    hookify-bridge [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
        --post              PostToolUse mode (warnings only)
    -c, --config PATH       Path to config file
        --rules-dir PATH    Directory with hookify.*.local.md rules
        --rule-source SRC   disabled-only (default) or all

ENVIRONMENT:
    CLAUDE_PROJECT_DIR      Rules are read from $CLAUDE_PROJECT_DIR/.claude
    HOOKIFY_BRIDGE_LOG      Log filter (default: warn)

EXIT CODES:
    0   allow, no feedback
    2   blocked (pre) or warning (post); message on stderr
    1   rules could not be loaded

USAGE AS HOOK:
    Configure in .claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash|Read",
          "hooks": [{{ "type": "command", "command": "hookify-bridge" }}]
        }}],
        "PostToolUse": [{{
          "matcher": "Bash|Read",
          "hooks": [{{ "type": "command", "command": "hookify-bridge --post" }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    mode: Mode,
    config_path: Option<String>,
    rules_dir: Option<String>,
    rule_source: Option<RuleSource>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            mode: Mode::from_args(&args),
            config_path: None,
            rules_dir: None,
            rule_source: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                "--rules-dir" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.rules_dir = Some(args[i].clone());
                    }
                }
                "--rule-source" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.rule_source = RuleSource::from_str(&args[i]);
                    }
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                arg if arg.starts_with("--rules-dir=") => {
                    let path = arg.trim_start_matches("--rules-dir=");
                    result.rules_dir = Some(path.to_string());
                }
                arg if arg.starts_with("--rule-source=") => {
                    let source = arg.trim_start_matches("--rule-source=");
                    result.rule_source = RuleSource::from_str(source);
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn")).init();

    // Load configuration
    let mut config = if let Some(ref path) = args.config_path {
        Config::load_from(std::path::Path::new(path)).unwrap_or_else(|e| {
            warn!("failed to load config from {}: {}", path, e);
            Config::default()
        })
    } else {
        Config::load()
    };

    if let Some(dir) = args.rules_dir {
        config.general.rules_dir = Some(dir);
    }
    if let Some(source) = args.rule_source {
        config.general.rule_source = source;
    }

    // Unreadable stdin is treated like empty input
    let mut stdin = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut stdin) {
        warn!("failed to read stdin: {}", e);
        stdin.clear();
    }

    match Bridge::new(config).run(&stdin, args.mode) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("hookify-bridge: {}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}
