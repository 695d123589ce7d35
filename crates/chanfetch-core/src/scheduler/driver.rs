//! Paced, sequential download driver.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::Rng;
use std::fs;
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;

use crate::catalog::normalize;
use crate::control::RunControl;
use crate::fetch::{AudioFetcher, FetchError};
use crate::pacing::{Pacer, Sleeper};
use crate::state::PendingDownload;

use super::progress::{RunProgress, RunSummary};
use super::round_robin::RoundRobinScheduler;

/// Pulls items from a [`RoundRobinScheduler`] one at a time and fetches them.
///
/// - A failed fetch is logged and counted, and the next item starts at once.
/// - A successful fetch is followed by a pacing wait, unless it was the
///   last item.
/// - A stop request is honoured before each item and during the wait. A
///   fetch that fails once a stop was requested counts as not attempted.
/// - Failing to create a channel directory aborts the run.
pub struct DownloadDriver<'a, F, S, R = StdRng> {
    fetcher: &'a F,
    sleeper: &'a S,
    pacer: Pacer<R>,
    output_root: PathBuf,
    control: RunControl,
    progress: Option<Sender<RunProgress>>,
}

impl<'a, F, S, R> DownloadDriver<'a, F, S, R>
where
    F: AudioFetcher,
    S: Sleeper,
    R: Rng,
{
    pub fn new(
        fetcher: &'a F,
        sleeper: &'a S,
        pacer: Pacer<R>,
        output_root: impl Into<PathBuf>,
        control: RunControl,
    ) -> Self {
        Self {
            fetcher,
            sleeper,
            pacer,
            output_root: output_root.into(),
            control,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: Option<Sender<RunProgress>>) -> Self {
        self.progress = progress;
        self
    }

    async fn emit(&self, event: RunProgress) {
        if let Some(tx) = &self.progress {
            let _ = tx.send(event).await;
        }
    }

    /// Drains `scheduler`. `skipped_existing` is carried into the summary.
    pub async fn run(
        mut self,
        mut scheduler: RoundRobinScheduler,
        skipped_existing: usize,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            skipped_existing,
            total_pending: scheduler.remaining(),
            ..RunSummary::default()
        };
        self.emit(RunProgress::Started {
            total_pending: summary.total_pending,
            already_downloaded: skipped_existing,
        })
        .await;

        while let Some(item) = scheduler.next_download() {
            if self.control.is_stopped() {
                summary.interrupted = true;
                break;
            }

            match self.download_one(&item).await? {
                Ok(path) => {
                    summary.downloaded += 1;
                    tracing::info!(
                        channel = %item.channel.title,
                        url = %item.video.url,
                        "downloaded {} ({}/{})",
                        path.display(),
                        summary.downloaded,
                        summary.total_pending
                    );
                    self.emit(RunProgress::Downloaded {
                        channel: item.channel.title.clone(),
                        title: item.video.title.clone(),
                        path,
                        downloaded: summary.downloaded,
                        total_pending: summary.total_pending,
                    })
                    .await;
                }
                Err(e) if self.control.is_stopped() => {
                    // The interrupt reached the fetch tool too; retried next run.
                    tracing::warn!("download of {} interrupted: {}", item.video.url, e);
                    summary.interrupted = true;
                    break;
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("failed to download {}: {}", item.video.url, e);
                    self.emit(RunProgress::Failed {
                        url: item.video.url.clone(),
                        title: item.video.title.clone(),
                        reason: e.to_string(),
                    })
                    .await;
                    continue;
                }
            }

            if !scheduler.has_pending() {
                break;
            }

            let wait = self.pacer.next_delay();
            tracing::info!("waiting {} seconds before next download", wait.as_secs());
            self.emit(RunProgress::Waiting { duration: wait }).await;
            tokio::select! {
                _ = self.sleeper.sleep(wait) => {}
                _ = self.control.stopped() => {
                    summary.interrupted = true;
                    break;
                }
            }
        }

        if summary.interrupted {
            tracing::warn!(
                "run interrupted: {} item(s) left for the next run",
                summary.not_attempted()
            );
        }
        tracing::info!(
            downloaded = summary.downloaded,
            failed = summary.failed,
            skipped_existing = summary.skipped_existing,
            "download run finished"
        );
        Ok(summary)
    }

    /// Outer `Result` is fatal (filesystem); inner is the per-item outcome.
    async fn download_one(
        &self,
        item: &PendingDownload,
    ) -> Result<std::result::Result<PathBuf, FetchError>> {
        let base_name = normalize(&item.video.title);
        if base_name.is_empty() {
            return Ok(Err(FetchError::EmptyName {
                title: item.video.title.clone(),
            }));
        }

        let channel_dir = self.output_root.join(item.channel.key());
        fs::create_dir_all(&channel_dir)
            .with_context(|| format!("create channel dir: {}", channel_dir.display()))?;

        self.emit(RunProgress::Fetching {
            channel: item.channel.title.clone(),
            title: item.video.title.clone(),
        })
        .await;

        let dest_base = channel_dir.join(base_name);
        Ok(self.fetcher.fetch(&item.video.url, &dest_base).await)
    }
}
