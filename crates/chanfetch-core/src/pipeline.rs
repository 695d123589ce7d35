//! End-to-end download run: catalog → filter → state → scheduler → driver.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;

use crate::catalog::load_catalog;
use crate::control::RunControl;
use crate::fetch::AudioFetcher;
use crate::filter::filter_channels;
use crate::lock::OutputLock;
use crate::pacing::{Pacer, Sleeper};
use crate::scheduler::{DownloadDriver, RoundRobinScheduler, RunProgress, RunSummary};
use crate::state::resolve_download_state;

/// Inputs of one `download` invocation.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub min_wait_secs: u64,
    pub max_wait_secs: u64,
    /// Channel names to keep; empty keeps every channel.
    pub only_channels: Vec<String>,
}

/// How a run ended. Only `Completed` means the driver ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// `only_channels` matched nothing.
    NoMatchingChannels,
    /// Every selected video is already on disk.
    NothingPending { already_downloaded: usize },
    Completed(RunSummary),
}

/// Runs the whole pipeline. Errors are fatal conditions: invalid pacing
/// bounds, an unusable output root, an unreadable catalog, a held lock.
/// Per-item fetch failures never surface here.
pub async fn run_download<F, S>(
    request: &DownloadRequest,
    fetcher: &F,
    sleeper: &S,
    control: RunControl,
    progress: Option<Sender<RunProgress>>,
) -> Result<RunOutcome>
where
    F: AudioFetcher,
    S: Sleeper,
{
    let pacer = Pacer::new(request.min_wait_secs, request.max_wait_secs)?;

    fs::create_dir_all(&request.output_dir)
        .with_context(|| format!("create output dir: {}", request.output_dir.display()))?;

    let catalog = load_catalog(&request.input_file)?;
    tracing::info!(
        channels = catalog.channels.len(),
        videos = catalog.video_count(),
        "loaded catalog {}",
        request.input_file.display()
    );

    let channels = filter_channels(catalog.channels, &request.only_channels);
    if channels.is_empty() {
        tracing::info!("no matching channels found based on names");
        return Ok(RunOutcome::NoMatchingChannels);
    }
    if !request.only_channels.is_empty() {
        tracing::info!("filtering: using only {} channel(s)", channels.len());
    }

    let state = resolve_download_state(channels, &request.output_dir)?;
    tracing::info!(
        "{} already downloaded, {} to download",
        state.already_downloaded,
        state.pending.len()
    );
    if state.pending.is_empty() {
        return Ok(RunOutcome::NothingPending {
            already_downloaded: state.already_downloaded,
        });
    }

    let _lock = OutputLock::acquire(&request.output_dir)?;

    let scheduler = RoundRobinScheduler::new(state.pending);
    let summary = DownloadDriver::new(fetcher, sleeper, pacer, &request.output_dir, control)
        .with_progress(progress)
        .run(scheduler, state.already_downloaded)
        .await?;

    Ok(RunOutcome::Completed(summary))
}
