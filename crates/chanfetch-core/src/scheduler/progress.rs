//! Progress events and the final run summary.
//!
//! The driver publishes [`RunProgress`] over an optional channel; the CLI
//! renders it. Nothing here is persisted.

use std::path::PathBuf;
use std::time::Duration;

/// One observable step of a download run.
#[derive(Debug, Clone)]
pub enum RunProgress {
    /// Emitted once before the first item.
    Started {
        total_pending: usize,
        already_downloaded: usize,
    },
    /// A fetch is about to run.
    Fetching { channel: String, title: String },
    /// A fetch succeeded; `downloaded` counts successes so far.
    Downloaded {
        channel: String,
        title: String,
        path: PathBuf,
        downloaded: usize,
        total_pending: usize,
    },
    /// A fetch failed; the run continues with the next item.
    Failed {
        url: String,
        title: String,
        reason: String,
    },
    /// Pacing wait before the next turn.
    Waiting { duration: Duration },
}

/// Final counts of a completed (or interrupted) run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Successful fetches this run.
    pub downloaded: usize,
    /// Failed fetches this run; retried by the next run.
    pub failed: usize,
    /// Videos that were already on disk before the run.
    pub skipped_existing: usize,
    /// Pending items when the run started.
    pub total_pending: usize,
    /// True if a stop request ended the run before the queues drained.
    pub interrupted: bool,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.downloaded + self.failed
    }

    /// Pending items never attempted (only non-zero after an interrupt).
    pub fn not_attempted(&self) -> usize {
        self.total_pending.saturating_sub(self.attempted())
    }
}
