use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

/// An isolated settings file and working directory for one test.
pub struct TestEnv {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    /// Environment without a settings file (defaults apply).
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        Self {
            temp_dir,
            config_path,
        }
    }

    /// Environment whose settings file holds `toml`.
    pub fn with_config(toml: &str) -> Self {
        let env = Self::new();
        std::fs::write(&env.config_path, toml).expect("Failed to write settings");
        env
    }

    pub fn root_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The binary, pointed at this environment's settings, with detection
    /// inputs cleared so results don't depend on the host terminal.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin("statusline"));
        cmd.current_dir(self.root_path())
            .env("STATUSLINE_CONFIG_PATH", &self.config_path)
            .env_remove("COLUMNS")
            .env_remove("RUST_LOG")
            .env("GIT_CONFIG_GLOBAL", "/dev/null")
            .env("GIT_CONFIG_SYSTEM", "/dev/null")
            .env("GIT_CEILING_DIRECTORIES", self.root_path());
        cmd
    }

    /// Run with `args`, piping `stdin_json` if given.
    pub fn run(&self, args: &[&str], stdin_json: Option<&str>) -> Output {
        let mut cmd = self.command();
        cmd.args(args);
        run_with_stdin(cmd, stdin_json)
    }

    /// Stdout of a successful run.
    pub fn stdout(&self, args: &[&str], stdin_json: Option<&str>) -> String {
        let output = self.run(args, stdin_json);
        assert!(
            output.status.success(),
            "statusline failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is not UTF-8")
    }
}

pub fn run_with_stdin(mut cmd: Command, stdin_json: Option<&str>) -> Output {
    cmd.stdin(if stdin_json.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().expect("failed to spawn command");
    if let Some(json) = stdin_json {
        let mut stdin = child.stdin.take().expect("failed to get stdin");
        stdin
            .write_all(json.as_bytes())
            .expect("failed to write stdin");
        // Dropping stdin closes the pipe so the binary sees EOF
    }
    child.wait_with_output().expect("failed to wait for output")
}

pub fn strip_ansi_codes(s: &str) -> String {
    let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    re.replace_all(s, "").to_string()
}

/// Visible cells of a line, ignoring SGR sequences.
pub fn visible_width(s: &str) -> usize {
    strip_ansi_codes(s).chars().count()
}
