//! The single-URL audio fetch collaborator.
//!
//! Contract: given a remote URL and a destination base path without
//! extension, either produce exactly one file `<base>.<ext>` and return its
//! path, or fail and leave nothing behind that the state resolver would
//! mistake for a finished download.

mod leftovers;
mod ytdlp;

use std::io;
use std::path::{Path, PathBuf};

pub use leftovers::{existing_outputs, find_output, remove_leftovers};
pub use ytdlp::YtDlpFetcher;

/// Why a single fetch failed. Never fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    Exited {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("fetch reported success but no file matches {}", .base.display())]
    MissingOutput { base: PathBuf },
    #[error("title {title:?} normalizes to an empty file name")]
    EmptyName { title: String },
    #[error("{0}")]
    Other(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Fetches the audio track of one URL.
#[allow(async_fn_in_trait)]
pub trait AudioFetcher {
    /// Downloads `url` to `<dest_base>.<ext>` and returns the produced path.
    async fn fetch(&self, url: &str, dest_base: &Path) -> Result<PathBuf, FetchError>;
}
