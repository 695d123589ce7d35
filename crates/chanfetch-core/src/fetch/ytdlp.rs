//! yt-dlp backed audio fetcher.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::leftovers::{existing_outputs, find_output, remove_leftovers};
use super::{AudioFetcher, FetchError};
use crate::config::FetchConfig;
use crate::ytdlp::{stderr_tail, YtDlp};

/// Runs `yt-dlp -x` for one URL, writing `<dest_base>.<audio ext>`.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    ytdlp: YtDlp,
    format: String,
    audio_format: String,
    audio_quality: String,
}

impl YtDlpFetcher {
    pub fn new(ytdlp: YtDlp, cfg: &FetchConfig) -> Self {
        Self {
            ytdlp,
            format: cfg.format.clone(),
            audio_format: cfg.audio_format.clone(),
            audio_quality: cfg.audio_quality.clone(),
        }
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self::new(YtDlp::from_config(cfg), cfg)
    }

    /// `<dest_base>.%(ext)s`, letting yt-dlp pick the final extension.
    fn output_template(dest_base: &Path) -> std::ffi::OsString {
        let mut template = dest_base.as_os_str().to_owned();
        template.push(".%(ext)s");
        template
    }

    fn discard_partial(dest_base: &Path, before: &HashSet<OsString>) {
        match remove_leftovers(dest_base, before) {
            Ok(0) => {}
            Ok(n) => tracing::debug!(base = %dest_base.display(), "removed {} partial file(s)", n),
            Err(e) => tracing::warn!(base = %dest_base.display(), "could not remove partial files: {}", e),
        }
    }
}

impl AudioFetcher for YtDlpFetcher {
    async fn fetch(&self, url: &str, dest_base: &Path) -> Result<PathBuf, FetchError> {
        let program = self.ytdlp.binary().to_string();
        tracing::debug!(url, base = %dest_base.display(), "invoking {}", program);
        let before = existing_outputs(dest_base);

        let output = self
            .ytdlp
            .command()
            .arg("-f")
            .arg(&self.format)
            .arg("-x")
            .arg("--audio-format")
            .arg(&self.audio_format)
            .arg("--audio-quality")
            .arg(&self.audio_quality)
            .args(["--no-playlist", "--quiet", "--no-progress", "--no-warnings"])
            .arg("-o")
            .arg(Self::output_template(dest_base))
            .arg("--")
            .arg(url)
            .output()
            .await
            .map_err(|source| FetchError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            Self::discard_partial(dest_base, &before);
            return Err(FetchError::Exited {
                program,
                code: output.status.code(),
                stderr: stderr_tail(&output.stderr),
            });
        }

        find_output(dest_base).ok_or_else(|| FetchError::MissingOutput {
            base: dest_base.to_path_buf(),
        })
    }
}
