//! End-to-end tests against the compiled binary

use crate::common::{bash_json, field_rule, read_json, rule, run_binary, Workspace};

#[test]
fn test_invalid_json_exits_zero_silently() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", "."));

    let cases: [&[&str]; 2] = [&[], &["--post"]];
    for args in cases {
        let out = ws.run("not json", args);
        assert_eq!(out.code, 0);
        assert!(out.stdout.is_empty());
        assert!(out.stderr.is_empty());
    }
}

#[test]
fn test_invalid_json_ignores_missing_rules_dir() {
    let out = run_binary(
        "not json",
        &["--rules-dir".to_string(), "/nonexistent/hookify-bridge/rules".to_string()],
    );
    assert_eq!(out.code, 0);
    assert!(out.stdout.is_empty());
}

#[test]
fn test_pre_block_writes_both_channels() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", r"rm\s+-rf"));

    let out = ws.run(&bash_json("rm -rf /"), &[]);
    assert_eq!(out.code, 2);
    assert_eq!(out.stderr, "**[no-rm]**\nno-rm fired\n");
    // Terminal is unavailable, so the banner falls back to stdout
    assert_eq!(out.stdout, "🚫 BLOCKED: **[no-rm]**\nno-rm fired\n");
}

#[test]
fn test_pre_allow_is_silent() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", r"rm\s+-rf"));

    let out = ws.run(&bash_json("ls"), &[]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.is_empty());
}

#[test]
fn test_post_warning_goes_to_stderr_only() {
    let ws = Workspace::new();
    ws.add_rule("passwd", &field_rule("passwd", "file", "warn", "file_path", "passwd"));

    let out = ws.run(&read_json("/etc/passwd"), &["--post"]);
    assert_eq!(out.code, 2);
    assert_eq!(out.stderr, "**[passwd]**\npasswd fired\n");
    assert!(out.stdout.is_empty());
}

#[test]
fn test_pre_warning_is_silent() {
    let ws = Workspace::new();
    ws.add_rule("passwd", &field_rule("passwd", "file", "warn", "file_path", "passwd"));

    let out = ws.run(&read_json("/etc/passwd"), &[]);
    assert_eq!(out.code, 0);
    assert!(out.stderr.is_empty());
}

#[test]
fn test_rule_source_flag_overrides_config() {
    let ws = Workspace::new();
    ws.add_rule("on", &rule("on", true, false, "bash", "block", "shutdown"));

    let default = ws.run(&bash_json("shutdown now"), &[]);
    assert_eq!(default.code, 0);

    let all = ws.run(&bash_json("shutdown now"), &["--rule-source", "all"]);
    assert_eq!(all.code, 2);

    let from_config = ws.run_with_config(&bash_json("shutdown now"), &[], "rule_source = \"all\"");
    assert_eq!(from_config.code, 2);
}

#[test]
fn test_missing_rules_dir_is_fatal() {
    let ws = Workspace::new();
    let missing = ws.rules_dir().join("missing");

    let out = ws.run(&bash_json("ls"), &["--rules-dir", &missing.display().to_string()]);
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("rules directory not found"));
}

#[test]
fn test_audit_log_records_verdict() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", "rm"));
    let audit = ws.rules_dir().join("audit").join("audit.jsonl");

    let extra = format!("audit_log = true\naudit_path = \"{}\"", audit.display());
    let out = ws.run_with_config(&bash_json("rm x"), &[], &extra);
    assert_eq!(out.code, 2);

    let log = std::fs::read_to_string(&audit).unwrap();
    let entry: serde_json::Value = serde_json::from_str(log.lines().next().unwrap()).unwrap();
    assert_eq!(entry["level"], "BLOCKED");
    assert_eq!(entry["mode"], "pre");
    assert_eq!(entry["tool"], "Bash");
    assert_eq!(entry["rules"], 1);
}

#[test]
fn test_version_flag() {
    let out = run_binary("", &["--version".to_string()]);
    assert_eq!(out.code, 0);
    assert!(out.stdout.starts_with("hookify-bridge "));
}

#[test]
fn test_null_tool_name_is_treated_as_bash() {
    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", r"rm\s+-rf"));

    let stdin = r#"{"tool_name":null,"tool_input":{"command":"rm -rf /"}}"#;
    let out = ws.run(stdin, &[]);
    assert_eq!(out.code, 2);
    assert_eq!(out.stderr, "**[no-rm]**\nno-rm fired\n");
}

#[test]
fn test_lookahead_rule_is_enforced() {
    let ws = Workspace::new();
    let pattern = r"git\s+push(?!.*--dry-run)";
    ws.add_rule("push", &rule("no-push", false, true, "bash", "block", pattern));

    let blocked = ws.run(&bash_json("git push --force"), &[]);
    assert_eq!(blocked.code, 2);

    let allowed = ws.run(&bash_json("git push --dry-run"), &[]);
    assert_eq!(allowed.code, 0);
    assert!(allowed.stderr.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_rules_dir_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    ws.add_rule("rm", &rule("no-rm", false, true, "bash", "block", r"rm\s+-rf"));
    let rules_dir = ws.rules_dir().join("locked");
    std::fs::create_dir(&rules_dir).unwrap();
    std::fs::set_permissions(&rules_dir, std::fs::Permissions::from_mode(0o000)).unwrap();

    // root ignores directory permissions
    let readable = std::fs::read_dir(&rules_dir).is_ok();
    let dir_arg = rules_dir.display().to_string();
    let out = ws.run(&bash_json("rm -rf /"), &["--rules-dir", dir_arg.as_str()]);
    std::fs::set_permissions(&rules_dir, std::fs::Permissions::from_mode(0o755)).unwrap();

    if readable {
        return;
    }
    assert_eq!(out.code, 1);
    assert!(out.stderr.contains("cannot read rules directory"));
}
