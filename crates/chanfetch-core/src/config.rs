use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Spacing between successful downloads (`[pacing]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Lower bound in seconds for the random wait after a successful download.
    pub min_wait_secs: u64,
    /// Upper bound in seconds (inclusive).
    pub max_wait_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_wait_secs: 10,
            max_wait_secs: 60,
        }
    }
}

/// How the yt-dlp collaborator is invoked (`[fetch]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// yt-dlp executable name or path.
    pub yt_dlp: String,
    /// Format selector passed to `-f`.
    pub format: String,
    /// Target codec for audio extraction (`--audio-format`).
    pub audio_format: String,
    /// Target quality for audio extraction (`--audio-quality`).
    pub audio_quality: String,
    /// Extra arguments prepended to every yt-dlp invocation (e.g. `--cookies`).
    pub extra_args: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            yt_dlp: "yt-dlp".to_string(),
            format: "bestaudio/best".to_string(),
            audio_format: "mp3".to_string(),
            audio_quality: "192K".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Global configuration loaded from `~/.config/chanfetch/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChanfetchConfig {
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("chanfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ChanfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ChanfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path (`--config`). The file must exist.
pub fn load_from(path: &Path) -> Result<ChanfetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ChanfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
