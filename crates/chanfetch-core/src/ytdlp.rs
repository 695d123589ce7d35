//! Shared yt-dlp process plumbing for the fetch and extract collaborators.

use std::process::Stdio;
use tokio::process::Command;

use crate::config::FetchConfig;

/// Lines of stderr kept when reporting a failed invocation.
const STDERR_TAIL_LINES: usize = 3;

/// How to launch yt-dlp: binary plus arguments prepended to every call.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
    extra_args: Vec<String>,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            binary: cfg.yt_dlp.clone(),
            extra_args: cfg.extra_args.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// A fresh command with stdin closed and output captured.
    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

/// Last few non-empty stderr lines, joined for a one-line error message.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}
