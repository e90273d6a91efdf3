//! End-to-end tests of regular (separator) layout.

use crate::common::{TestEnv, strip_ansi_codes, visible_width};
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;

const TWO_ITEMS: &str = r#"
color-level = "none"
flex-mode = "full"

[[lines]]
items = [
  { type = "custom-text", text = "AA" },
  { type = "custom-text", text = "BB" },
]
"#;

#[test]
fn test_two_items_joined_by_separator() {
    let env = TestEnv::with_config(TWO_ITEMS);
    let mut cmd = env.command();
    cmd.args(["--width", "20"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    AA | BB

    ----- stderr -----
    ");
}

#[test]
fn test_narrow_terminal_truncates_silently() {
    let env = TestEnv::with_config(
        r#"
color-level = "basic"
flex-mode = "full"

[[lines]]
items = [
  { type = "custom-text", text = "AA", color = "red" },
  { type = "custom-text", text = "BB", color = "blue" },
]
"#,
    );
    let out = env.stdout(&["--width", "6"], None);
    let line = out.strip_suffix('\n').unwrap();

    assert_eq!(visible_width(line), 6);
    assert_eq!(strip_ansi_codes(line), "AA | B");
    // The style opened for "BB" is closed at the cut
    assert!(line.ends_with("B\x1b[0m"));
}

#[test]
fn test_widgets_read_stdin_context() {
    let env = TestEnv::with_config(
        r#"
color-level = "none"
flex-mode = "full"

[[lines]]
items = [
  { type = "model" },
  { type = "session-cost" },
  { type = "git-branch" },
  { type = "version", raw-value = true },
]
"#,
    );
    let json = r#"{"model": {"display_name": "Opus"}, "cost": {"total_cost_usd": 1.5}, "version": "1.0.80"}"#;
    let out = env.stdout(&["--width", "100"], Some(json));
    // Not a git repository, so the branch widget drops out with its separator
    assert_snapshot!(out.trim_end(), @"Model: Opus | Cost: $1.50 | 1.0.80");
}

#[test]
fn test_every_line_is_newline_terminated() {
    let env = TestEnv::with_config(
        r#"
color-level = "none"
flex-mode = "full"

[[lines]]
items = [{ type = "custom-text", text = "first" }]

[[lines]]
items = [{ type = "model" }]

[[lines]]
items = [{ type = "custom-text", text = "third" }]
"#,
    );
    let out = env.stdout(&["--width", "40"], None);
    assert_eq!(out, "first\n\nthird\n");
}

#[test]
fn test_flex_separator_spans_the_width() {
    let env = TestEnv::with_config(
        r#"
color-level = "256"
flex-mode = "full"

[[lines]]
items = [
  { type = "custom-text", text = "left", color = "ansi256:208" },
  { type = "flex-separator" },
  { type = "custom-text", text = "right", color = "hex:00ff00" },
]
"#,
    );
    let out = env.stdout(&["--width", "50"], None);
    let line = out.trim_end_matches('\n');
    assert_eq!(visible_width(line), 50);
    assert!(line.starts_with("\x1b[38;5;208mleft"));
    // Downsampled to the 256-color palette
    assert!(line.contains("\x1b[38;5;46mright"));
}

#[test]
fn test_flex_mode_reserves_margin() {
    let config = r#"
color-level = "none"

[[lines]]
items = [
  { type = "custom-text", text = "L" },
  { type = "flex-separator" },
  { type = "custom-text", text = "R" },
]
"#;
    let env = TestEnv::with_config(config);
    let out = env.stdout(&["--width", "100"], None);
    assert_eq!(visible_width(out.trim_end()), 60);
}

#[test]
fn test_full_until_compact_follows_context_usage() {
    let env = TestEnv::with_config(
        r#"
color-level = "none"
flex-mode = "full-until-compact"
compact-threshold = 80

[[lines]]
items = [
  { type = "custom-text", text = "L" },
  { type = "flex-separator" },
  { type = "custom-text", text = "R" },
]
"#,
    );
    let roomy = env.stdout(
        &["--width", "100"],
        Some(r#"{"context_window": {"used_percentage": 20}}"#),
    );
    assert_eq!(visible_width(roomy.trim_end()), 100);

    let tight = env.stdout(
        &["--width", "100"],
        Some(r#"{"context_window": {"total_input_tokens": 180000, "context_window_size": 200000}}"#),
    );
    assert_eq!(visible_width(tight.trim_end()), 60);
}

#[test]
fn test_columns_env_sets_width() {
    let env = TestEnv::with_config(TWO_ITEMS);
    let mut cmd = env.command();
    cmd.env("COLUMNS", "5");
    let output = crate::common::run_with_stdin(cmd, None);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "AA | \n");
}

#[test]
fn test_color_level_flag_overrides_settings() {
    let env = TestEnv::with_config(
        r##"
color-level = "truecolor"
flex-mode = "full"

[[lines]]
items = [{ type = "custom-text", text = "hi", color = "#ff0000", bold = true }]
"##,
    );
    let colored = env.stdout(&["--width", "40"], None);
    assert_eq!(colored, "\x1b[1m\x1b[38;2;255;0;0mhi\x1b[0m\n");

    let plain = env.stdout(&["--width", "40", "--color-level", "none"], None);
    assert_eq!(plain, "hi\n");
}

#[test]
fn test_environment_overrides_settings_file() {
    let env = TestEnv::with_config(TWO_ITEMS);
    let mut cmd = env.command();
    cmd.args(["--width", "40"])
        .env("STATUSLINE__DEFAULT_SEPARATOR", " / ");
    let output = crate::common::run_with_stdin(cmd, None);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "AA / BB\n");
}

#[test]
fn test_invalid_settings_fall_back_to_defaults() {
    let env = TestEnv::with_config("color-level = \"sepia\"\n");
    let output = env.run(
        &["--width", "80", "--color-level", "none"],
        Some(r#"{"model": {"display_name": "Opus"}}"#),
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("statusline: ignoring"), "stderr: {stderr}");
    // Default line: model, current-dir, git-branch
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Model: Opus | cwd: "), "stdout: {stdout}");
}

#[test]
fn test_config_flag_takes_priority() {
    let env = TestEnv::with_config(TWO_ITEMS);
    let other = env.root_path().join("other.toml");
    std::fs::write(
        &other,
        "color-level = \"none\"\n[[lines]]\nitems = [{ type = \"custom-text\", text = \"other\" }]\n",
    )
    .unwrap();

    let out = env.stdout(&["--width", "80", "--config", other.to_str().unwrap()], None);
    assert_eq!(out, "other\n");
}

#[cfg(unix)]
#[test]
fn test_custom_command_gets_context() {
    let env = TestEnv::with_config(
        r#"
color-level = "none"
flex-mode = "full"

[[lines]]
items = [
  { type = "custom-command", command = "grep -o '\"session_id\": *\"[a-z0-9]*\"' | cut -d'\"' -f4" },
  { type = "custom-command", command = "exit 1" },
  { type = "custom-text", text = "end" },
]
"#,
    );
    let out = env.stdout(&["--width", "80"], Some(r#"{"session_id": "abc123"}"#));
    assert_eq!(out, "abc123 | end\n");
}
