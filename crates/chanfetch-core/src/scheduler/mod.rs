//! Round-robin download scheduling and the paced driver that consumes it.
//!
//! Pipeline: resolved pending list → per-channel queues → one item per
//! channel per turn → fetch → pacing wait → next turn.

mod driver;
mod progress;
mod round_robin;

pub use driver::DownloadDriver;
pub use progress::{RunProgress, RunSummary};
pub use round_robin::RoundRobinScheduler;
