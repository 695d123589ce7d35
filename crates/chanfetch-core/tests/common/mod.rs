//! Shared fakes and builders for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chanfetch_core::catalog::{save_catalog, Catalog, Channel, Video};
use chanfetch_core::control::RunControl;
use chanfetch_core::fetch::{AudioFetcher, FetchError};
use chanfetch_core::pacing::Sleeper;

/// Fetcher that writes `<base>.mp3` unless the URL is marked as failing.
#[derive(Default)]
pub struct FakeFetcher {
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    interrupted_on: Option<(String, RunControl)>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(urls: &[&str]) -> Self {
        Self {
            failing: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Fails `url` the way a fetch killed by Ctrl-C does: the stop request
    /// lands first, then the fetch reports an error.
    pub fn interrupted_on(url: &str, control: RunControl) -> Self {
        Self {
            interrupted_on: Some((url.to_string(), control)),
            ..Self::default()
        }
    }

    /// URLs in the order they were fetched.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl AudioFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, dest_base: &Path) -> Result<PathBuf, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some((stop_url, control)) = &self.interrupted_on {
            if stop_url == url {
                control.request_stop();
                return Err(FetchError::Other("killed by signal".to_string()));
            }
        }
        if self.failing.contains(url) {
            return Err(FetchError::Other(format!("remote rejected {url}")));
        }
        let mut path = dest_base.as_os_str().to_owned();
        path.push(".mp3");
        let path = PathBuf::from(path);
        fs::write(&path, b"audio").map_err(|e| FetchError::Other(e.to_string()))?;
        Ok(path)
    }
}

/// Sleeper that records requested durations and returns immediately.
/// Optionally requests a stop once it has been asked to sleep `n` times.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
    stop_after: Option<(usize, RunControl)>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_after(n: usize, control: RunControl) -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
            stop_after: Some((n, control)),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        let count = {
            let mut sleeps = self.sleeps.lock().unwrap();
            sleeps.push(duration);
            sleeps.len()
        };
        if let Some((n, control)) = &self.stop_after {
            if count >= *n {
                control.request_stop();
            }
        }
    }
}

/// Video whose URL is `https://example.com/<channel>/<title>`.
pub fn video(channel: &str, title: &str) -> Video {
    Video::new(format!("https://example.com/{channel}/{title}"), title, ".*")
}

/// Channel `title` with videos titled `<title>1..=<count>`.
pub fn channel(title: &str, count: usize) -> Channel {
    let videos: Vec<Video> = (1..=count)
        .map(|i| video(title, &format!("{title}{i}")))
        .collect();
    Channel::new(title, format!("https://example.com/@{title}"), videos)
}

/// Writes `channels` as a catalog file under `dir` and returns its path.
pub fn write_catalog(dir: &Path, channels: Vec<Channel>) -> PathBuf {
    let path = dir.join("channels.yaml");
    save_catalog(&path, &Catalog { channels }).unwrap();
    path
}

/// Names of files directly inside `dir`, sorted.
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
