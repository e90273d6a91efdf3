//! Command execution for widgets that shell out.
//!
//! - Unix: shell commands run through `sh -c` (resolved via PATH)
//! - Windows: shell commands run through `cmd /C`
//!
//! Every command is logged at debug level with its duration, and may be
//! bounded by a timeout after which the child is killed.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

/// Cached shell configuration for the current platform
static SHELL_CONFIG: OnceLock<ShellConfig> = OnceLock::new();

/// Shell configuration for command execution
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Path to the shell executable
    pub executable: PathBuf,
    /// Arguments to pass before the command (e.g., ["-c"] for sh, ["/C"] for cmd)
    pub args: Vec<String>,
}

impl ShellConfig {
    /// Get the shell configuration for the current platform
    pub fn get() -> &'static ShellConfig {
        SHELL_CONFIG.get_or_init(detect_shell)
    }
}

fn detect_shell() -> ShellConfig {
    #[cfg(unix)]
    {
        ShellConfig {
            executable: PathBuf::from("sh"),
            args: vec!["-c".to_string()],
        }
    }

    #[cfg(windows)]
    {
        ShellConfig {
            executable: PathBuf::from("cmd"),
            args: vec!["/C".to_string()],
        }
    }
}

/// Builder for executing commands with logging, optional stdin and a timeout.
///
/// ```ignore
/// let output = Cmd::new("git")
///     .args(["rev-parse", "--abbrev-ref", "HEAD"])
///     .current_dir(&dir)
///     .run()?;
///
/// let output = Cmd::shell("jq -r .model.id")
///     .stdin(context_json)
///     .timeout(Duration::from_millis(500))
///     .run()?;
/// ```
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    stdin_data: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            stdin_data: None,
            timeout: None,
        }
    }

    /// A command string interpreted by the platform shell.
    pub fn shell(command: &str) -> Self {
        let shell = ShellConfig::get();
        Self::new(shell.executable.to_string_lossy())
            .args(shell.args.iter().cloned())
            .arg(command)
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set data to write to the command's stdin.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin_data = Some(data.into());
        self
    }

    /// Kill the command if it has not exited after `duration`.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Execute the command and return its output.
    ///
    /// A timeout surfaces as an `ErrorKind::TimedOut` error.
    pub fn run(self) -> std::io::Result<Output> {
        let cmd_str = if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        };
        log::debug!("$ {cmd_str}");

        let t0 = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(if self.stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;

        // Feed stdin and drain stdout/stderr on their own threads so a chatty
        // child can never block on a full pipe while we wait on it
        if let (Some(mut stdin), Some(data)) = (child.stdin.take(), self.stdin_data) {
            thread::spawn(move || {
                // BrokenPipe just means the command exited without reading
                let _ = stdin.write_all(&data);
            });
        }
        let stdout_thread = drain(child.stdout.take());
        let stderr_thread = drain(child.stderr.take());

        let status: ExitStatus = match self.timeout {
            Some(timeout) => match child.wait_timeout(timeout)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    log::debug!("$ {cmd_str} timed out after {timeout:?}");
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("`{cmd_str}` timed out after {timeout:?}"),
                    ));
                }
            },
            None => child.wait()?,
        };

        let output = Output {
            status,
            stdout: stdout_thread.join().unwrap_or_default(),
            stderr: stderr_thread.join().unwrap_or_default(),
        };

        log::debug!(
            "$ {cmd_str} [{}ms, {}]",
            t0.elapsed().as_millis(),
            output.status
        );

        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(handle: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut handle) = handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    })
}
