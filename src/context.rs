//! Render context: the JSON document piped to the status line on stdin.
//!
//! The pipeline treats the context as opaque and only hands it to widgets.
//! The accessors here exist for widgets and for the compacting check of the
//! `full-until-compact` width mode.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::Value;

/// How long to wait for the caller to pipe the context document.
const STDIN_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    data: Value,
}

impl RenderContext {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Parse a context document. Invalid JSON yields an empty context.
    pub fn from_json(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::default();
        }
        match serde_json::from_str(input) {
            Ok(data) => Self { data },
            Err(e) => {
                log::debug!("Ignoring unparseable context JSON: {e}");
                Self::default()
            }
        }
    }

    /// Read the context document from stdin.
    ///
    /// Returns an empty context if stdin is a terminal, stays silent past
    /// the timeout, or does not contain valid JSON.
    pub fn from_stdin() -> Self {
        if io::stdin().is_terminal() {
            return Self::default();
        }

        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut input = String::new();
            let _ = io::stdin().read_to_string(&mut input);
            let _ = tx.send(input);
        });

        match rx.recv_timeout(STDIN_TIMEOUT) {
            Ok(input) => Self::from_json(&input),
            Err(_) => {
                log::debug!("No context on stdin after {STDIN_TIMEOUT:?}");
                Self::default()
            }
        }
    }

    /// The raw document, for widgets that forward it (e.g. to shell commands).
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Look up a nested value by key path.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.data, |value, key| value.get(*key))
    }

    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn get_f64(&self, path: &[&str]) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Directory the session is working in, falling back to the process cwd.
    pub fn current_dir(&self) -> PathBuf {
        self.get_str(&["workspace", "current_dir"])
            .or_else(|| self.get_str(&["cwd"]))
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Percentage of the context window in use, if the document reports it.
    pub fn context_usage_percent(&self) -> Option<f64> {
        if let Some(percent) = self.get_f64(&["context_window", "used_percentage"]) {
            return Some(percent);
        }
        let used = self.get_f64(&["context_window", "total_input_tokens"])?;
        let size = self.get_f64(&["context_window", "context_window_size"])?;
        (size > 0.0).then(|| used / size * 100.0)
    }
}
