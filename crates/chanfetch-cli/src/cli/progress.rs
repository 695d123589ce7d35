//! Terminal rendering of [`RunProgress`] events.

use chanfetch_core::scheduler::RunProgress;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::Receiver;

const BAR_TEMPLATE: &str = "Downloaded: {pos} / {len} [{wide_bar}] {msg}";

fn new_bar(total: usize) -> ProgressBar {
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let pb = ProgressBar::new(total as u64);
    pb.set_style(style);
    pb
}

/// Drains `rx` until the sender is dropped.
pub async fn render(mut rx: Receiver<RunProgress>) {
    let mut bar: Option<ProgressBar> = None;
    while let Some(event) = rx.recv().await {
        match event {
            RunProgress::Started {
                total_pending,
                already_downloaded,
            } => {
                println!("Already downloaded: {}", already_downloaded);
                println!("To download: {}", total_pending);
                bar = Some(new_bar(total_pending));
            }
            RunProgress::Fetching { channel, title } => {
                if let Some(pb) = &bar {
                    pb.set_message(format!("{channel}: {title}"));
                }
            }
            RunProgress::Downloaded { downloaded, .. } => {
                if let Some(pb) = &bar {
                    pb.set_position(downloaded as u64);
                }
            }
            RunProgress::Failed { url, reason, .. } => {
                let line = format!("Failed to download {url}: {reason}");
                match &bar {
                    Some(pb) => pb.println(line),
                    None => eprintln!("{line}"),
                }
            }
            RunProgress::Waiting { duration } => {
                if let Some(pb) = &bar {
                    pb.set_message(format!("waiting {}s", duration.as_secs()));
                }
            }
        }
    }
    if let Some(pb) = bar {
        pb.finish_with_message("done");
    }
}
