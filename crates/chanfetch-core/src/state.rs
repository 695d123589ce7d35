//! Download state resolution: which catalog entries are already on disk.
//!
//! There is no ledger. A video counts as downloaded when its channel
//! directory holds any file whose name, minus its last extension, equals the
//! normalized video title. The container format is whatever the fetcher
//! chose, so every extension counts, but there must be one: a bare `x` does
//! not match. Partial files such as `x.webm.part` keep an inner extension
//! and do not match either.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{normalize, Channel, Video};

/// A (channel, video) pair that still needs fetching.
#[derive(Debug, Clone)]
pub struct PendingDownload {
    pub channel: Arc<Channel>,
    pub video: Video,
}

/// Result of [`resolve_download_state`].
#[derive(Debug, Default)]
pub struct DownloadState {
    /// Videos whose file already exists.
    pub already_downloaded: usize,
    /// Everything else, in catalog order (channel order, then video order).
    pub pending: Vec<PendingDownload>,
}

impl DownloadState {
    pub fn total(&self) -> usize {
        self.already_downloaded + self.pending.len()
    }
}

/// Directory holding a channel's audio files.
pub fn channel_dir(output_root: &Path, channel: &Channel) -> PathBuf {
    output_root.join(channel.key())
}

/// Base path (no extension) for a video's audio file.
pub fn video_base_path(output_root: &Path, channel: &Channel, video: &Video) -> PathBuf {
    channel_dir(output_root, channel).join(normalize(&video.title))
}

/// Partitions every video of `channels` into already-downloaded and pending.
/// Reads the filesystem only.
pub fn resolve_download_state(channels: Vec<Channel>, output_root: &Path) -> Result<DownloadState> {
    let mut state = DownloadState::default();
    let mut stems_by_dir: HashMap<PathBuf, HashSet<String>> = HashMap::new();

    for channel in channels {
        let dir = channel_dir(output_root, &channel);
        if !stems_by_dir.contains_key(&dir) {
            let stems = existing_stems(&dir)?;
            stems_by_dir.insert(dir.clone(), stems);
        }
        let stems = &stems_by_dir[&dir];

        let channel = Arc::new(channel);
        for video in channel.videos.iter() {
            if stems.contains(&normalize(&video.title)) {
                state.already_downloaded += 1;
            } else {
                state.pending.push(PendingDownload {
                    channel: Arc::clone(&channel),
                    video: video.clone(),
                });
            }
        }
    }

    tracing::debug!(
        already_downloaded = state.already_downloaded,
        pending = state.pending.len(),
        "resolved download state"
    );
    Ok(state)
}

/// File stems present in `dir`. A missing directory has none.
fn existing_stems(dir: &Path) -> Result<HashSet<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(e) => return Err(e).with_context(|| format!("read channel dir: {}", dir.display())),
    };

    let mut stems = HashSet::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read channel dir: {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none() {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            stems.insert(stem.to_string_lossy().into_owned());
        }
    }
    Ok(stems)
}
