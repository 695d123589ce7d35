//! `chanfetch download` – fetch every pending catalog video, paced and round-robin.

use anyhow::Result;
use chanfetch_core::config::ChanfetchConfig;
use chanfetch_core::control::RunControl;
use chanfetch_core::fetch::YtDlpFetcher;
use chanfetch_core::pacing::TokioSleeper;
use chanfetch_core::pipeline::{self, DownloadRequest, RunOutcome};
use chanfetch_core::scheduler::RunProgress;
use std::path::PathBuf;

use crate::cli::progress;

pub async fn run_download(
    cfg: &ChanfetchConfig,
    input_file: PathBuf,
    output_dir: PathBuf,
    min_wait: u64,
    max_wait: u64,
    only_channels: Vec<String>,
) -> Result<()> {
    let request = DownloadRequest {
        input_file,
        output_dir,
        min_wait_secs: min_wait,
        max_wait_secs: max_wait,
        only_channels,
    };

    let control = RunControl::new();
    let on_interrupt = control.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; stopping after the current item");
            eprintln!("Interrupted, stopping after the current item...");
            on_interrupt.request_stop();
        }
    });

    let fetcher = YtDlpFetcher::from_config(&cfg.fetch);
    let (progress_tx, progress_rx) = tokio::sync::mpsc::channel::<RunProgress>(32);
    let progress_handle = tokio::spawn(progress::render(progress_rx));

    let result = pipeline::run_download(
        &request,
        &fetcher,
        &TokioSleeper,
        control,
        Some(progress_tx),
    )
    .await;
    let _ = progress_handle.await;

    match result? {
        RunOutcome::NoMatchingChannels => {
            println!("No matching channels found based on names.");
        }
        RunOutcome::NothingPending { already_downloaded } => {
            println!("Already downloaded: {}", already_downloaded);
            println!("Nothing to download.");
        }
        RunOutcome::Completed(summary) => {
            println!(
                "Downloaded {} of {} ({} failed, {} already present).",
                summary.downloaded,
                summary.total_pending,
                summary.failed,
                summary.skipped_existing
            );
            if summary.interrupted {
                println!(
                    "Stopped early: {} item(s) left for the next run.",
                    summary.not_attempted()
                );
            }
        }
    }

    Ok(())
}
