//! Library-level tests: rule ownership and verdicts through `Bridge`

use hookify_bridge::{Bridge, Config, HookInput, Mode, RuleSource, Verdict};

use crate::common::{bash_json, field_rule, read_json, rule, Workspace};

fn bridge(ws: &Workspace, source: RuleSource) -> Bridge {
    let mut config = Config::default();
    config.general.rules_dir = Some(ws.rules_dir().display().to_string());
    config.general.rule_source = source;
    Bridge::new(config)
}

fn decide(ws: &Workspace, source: RuleSource, json: &str, mode: Mode) -> Verdict {
    let input = HookInput::from_json(json).unwrap();
    bridge(ws, source).decide(&input, mode).unwrap()
}

// ============================================================================
// Rule ownership
// ============================================================================

#[test]
fn test_bridge_owned_rule_blocks() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", r"rm\s+-rf"));

    let verdict = decide(&ws, RuleSource::DisabledOnly, &bash_json("rm -rf /"), Mode::Pre);
    assert_eq!(
        verdict,
        Verdict::Block {
            message: "**[no-rm]**\nno-rm fired".to_string()
        }
    );
}

#[test]
fn test_host_enabled_rule_ignored() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", true, true, "bash", "block", r"rm\s+-rf"));

    let verdict = decide(&ws, RuleSource::DisabledOnly, &bash_json("rm -rf /"), Mode::Pre);
    assert!(verdict.is_allow());
}

#[test]
fn test_fully_disabled_rule_ignored() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, false, "bash", "block", r"rm\s+-rf"));

    let verdict = decide(&ws, RuleSource::DisabledOnly, &bash_json("rm -rf /"), Mode::Pre);
    assert!(verdict.is_allow());
}

#[test]
fn test_all_source_uses_enabled_rules() {
    let ws = Workspace::new();
    ws.add_rule("on", &rule("on", true, false, "bash", "block", "shutdown"));
    ws.add_rule("off", &rule("off", false, true, "bash", "block", "reboot"));

    let on = decide(&ws, RuleSource::All, &bash_json("shutdown now"), Mode::Pre);
    assert!(!on.is_allow());

    let off = decide(&ws, RuleSource::All, &bash_json("reboot"), Mode::Pre);
    assert!(off.is_allow());
}

// ============================================================================
// Event scoping
// ============================================================================

#[test]
fn test_file_rule_only_applies_to_read() {
    let ws = Workspace::new();
    ws.add_rule("passwd", &field_rule("passwd", "file", "block", "file_path", "/etc/passwd"));

    let read = decide(&ws, RuleSource::DisabledOnly, &read_json("/etc/passwd"), Mode::Pre);
    assert!(!read.is_allow());

    // Any non-Read tool is a bash event, so file rules are not loaded
    let write = r#"{"tool_name":"Write","tool_input":{"file_path":"/etc/passwd","content":"x"}}"#;
    let verdict = decide(&ws, RuleSource::DisabledOnly, write, Mode::Pre);
    assert!(verdict.is_allow());
}

#[test]
fn test_all_event_rule_applies_everywhere() {
    let ws = Workspace::new();
    ws.add_rule("secret", &field_rule("secret", "all", "block", "file_path", "secret"));

    let read = decide(&ws, RuleSource::DisabledOnly, &read_json("/srv/secret.txt"), Mode::Pre);
    assert!(!read.is_allow());

    let edit = r#"{"tool_name":"Edit","tool_input":{"file_path":"/srv/secret.txt","old_string":"a","new_string":"b"}}"#;
    let verdict = decide(&ws, RuleSource::DisabledOnly, edit, Mode::Pre);
    assert!(!verdict.is_allow());
}

// ============================================================================
// Modes
// ============================================================================

#[test]
fn test_post_mode_reports_warnings() {
    let ws = Workspace::new();
    ws.add_rule("passwd", &field_rule("passwd", "file", "warn", "file_path", "passwd"));

    let pre = decide(&ws, RuleSource::DisabledOnly, &read_json("/etc/passwd"), Mode::Pre);
    assert!(pre.is_allow());

    let post = decide(&ws, RuleSource::DisabledOnly, &read_json("/etc/passwd"), Mode::Post);
    assert_eq!(
        post,
        Verdict::Warn {
            message: "**[passwd]**\npasswd fired".to_string()
        }
    );
}

#[test]
fn test_post_mode_ignores_blocks() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", "rm"));
    ws.add_rule("warn", &rule("rm-warn", false, true, "bash", "warn", "rm"));

    // The block wins inside the engine, and post mode only reports warnings
    let verdict = decide(&ws, RuleSource::DisabledOnly, &bash_json("rm x"), Mode::Post);
    assert!(verdict.is_allow());
}

#[test]
fn test_no_match_allows() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", r"rm\s+-rf"));

    let verdict = decide(&ws, RuleSource::DisabledOnly, &bash_json("ls -la"), Mode::Pre);
    assert!(verdict.is_allow());
}
