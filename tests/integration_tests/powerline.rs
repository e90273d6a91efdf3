//! End-to-end tests of Powerline layout.

use crate::common::{TestEnv, strip_ansi_codes, visible_width};

const SEP: char = '\u{e0b0}';

#[test]
fn test_segments_with_theme() {
    let env = TestEnv::with_config(
        r#"
color-level = "basic"
flex-mode = "full"

[powerline]
enabled = true
theme = [{ fg = "white", bg = "blue" }, { fg = "black", bg = "red" }]

[[lines]]
items = [
  { type = "custom-text", text = "one" },
  { type = "custom-text", text = "two" },
]
"#,
    );
    let out = env.stdout(&["--width", "80"], None);
    let line = out.strip_suffix('\n').unwrap();

    assert_eq!(line.matches(SEP).count(), 2);
    assert_eq!(strip_ansi_codes(line), "one\u{e0b0}two\u{e0b0}");
    // blue -> red transition, then red -> default background
    assert!(line.contains("\x1b[34m\x1b[41m\u{e0b0}"));
    assert!(line.contains("\x1b[31m\x1b[49m\u{e0b0}"));
    // A single reset, after the terminator
    assert_eq!(line.matches("\x1b[0m").count(), 1);
    assert!(line.ends_with("\u{e0b0}\x1b[0m"));
}

#[test]
fn test_auto_align_lines_up_columns() {
    let env = TestEnv::with_config(
        r#"
color-level = "truecolor"
flex-mode = "full"
default-padding = " "

[powerline]
enabled = true
auto-align = true

[[lines]]
items = [
  { type = "custom-text", text = "short" },
  { type = "custom-text", text = "a" },
  { type = "custom-text", text = "tail" },
]

[[lines]]
items = [
  { type = "custom-text", text = "much longer" },
  { type = "custom-text", text = "abc" },
]
"#,
    );
    let out = env.stdout(&["--width", "120"], None);
    let lines: Vec<String> = out.lines().map(strip_ansi_codes).collect();
    assert_eq!(lines.len(), 2);

    let seams = |line: &str| -> Vec<usize> {
        line.chars()
            .enumerate()
            .filter(|(_, c)| *c == SEP)
            .map(|(i, _)| i)
            .collect()
    };
    let first = seams(&lines[0]);
    let second = seams(&lines[1]);
    assert_eq!(first[..2], second[..2]);
    assert_eq!(lines[1], " much longer \u{e0b0} abc \u{e0b0}");
}

#[test]
fn test_truncation_drops_trailing_segments() {
    let env = TestEnv::with_config(
        r#"
color-level = "256"
flex-mode = "full"

[powerline]
enabled = true

[[lines]]
items = [
  { type = "custom-text", text = "first" },
  { type = "custom-text", text = "second" },
  { type = "custom-text", text = "third" },
]
"#,
    );
    let out = env.stdout(&["--width", "14"], None);
    let line = out.trim_end_matches('\n');
    assert_eq!(strip_ansi_codes(line), "first\u{e0b0}second\u{e0b0}");
    assert!(visible_width(line) <= 14);
    assert!(line.ends_with("\x1b[0m"));
}

#[test]
fn test_caps_and_flex_groups() {
    let env = TestEnv::with_config(
        r#"
color-level = "none"
flex-mode = "full"

[powerline]
enabled = true
start-cap = "\ue0b6"
end-cap = "\ue0b4"

[[lines]]
items = [
  { type = "custom-text", text = "L" },
  { type = "flex-separator" },
  { type = "custom-text", text = "R" },
]
"#,
    );
    let out = env.stdout(&["--width", "20"], None);
    let line = out.trim_end_matches('\n');
    assert_eq!(visible_width(line), 20);
    assert!(line.starts_with("\u{e0b6}L\u{e0b4}\u{a0}"));
    assert!(line.ends_with("\u{a0}\u{e0b6}R\u{e0b4}"));
}
