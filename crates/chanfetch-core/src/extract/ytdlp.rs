//! yt-dlp backed channel extractor (`--flat-playlist -J`).

use anyhow::{Context, Result};
use serde_json::Value;

use super::ChannelExtractor;
use crate::ytdlp::{stderr_tail, YtDlp};

#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp: YtDlp,
}

impl YtDlpExtractor {
    pub fn new(ytdlp: YtDlp) -> Self {
        Self { ytdlp }
    }
}

impl ChannelExtractor for YtDlpExtractor {
    async fn extract(&self, channel_url: &str) -> Result<Value> {
        let output = self
            .ytdlp
            .command()
            .args(["--flat-playlist", "-J", "--quiet", "--no-warnings", "--"])
            .arg(channel_url)
            .output()
            .await
            .with_context(|| format!("could not start {}", self.ytdlp.binary()))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} failed ({}): {}",
                self.ytdlp.binary(),
                output.status,
                stderr_tail(&output.stderr)
            );
        }

        serde_json::from_slice(&output.stdout).context("parse yt-dlp JSON listing")
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn stub(dir: &std::path::Path, body: &str) -> YtDlpExtractor {
        let path = dir.join("yt-dlp-stub");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        YtDlpExtractor::new(YtDlp::new(path.to_string_lossy().into_owned()))
    }

    #[tokio::test]
    async fn parses_stdout_json() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub(
            dir.path(),
            r#"echo '{"title": "Chan", "entries": [{"url": "u1", "title": "t1"}]}'"#,
        );
        let value = extractor.extract("https://example.com/@chan").await.unwrap();
        assert_eq!(value["title"], "Chan");
        assert_eq!(value["entries"][0]["url"], "u1");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = stub(dir.path(), "echo 'ERROR: Unsupported URL' >&2; exit 1");
        let err = extractor.extract("https://example.com/x").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported URL"));
    }
}
