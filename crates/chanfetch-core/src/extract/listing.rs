//! Walking a flat channel listing.

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::catalog::{Channel, Video, VideoSet};

/// Title filter. Matches are anchored at the start of the title only, so
/// `Episode` keeps "Episode 12" but not "Best Episode".
#[derive(Debug, Clone)]
pub struct TitlePattern {
    source: String,
    regex: Regex,
}

impl TitlePattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

/// Collects matching videos from `entry` and everything nested under it.
pub fn collect_videos(entry: &Value, pattern: &TitlePattern) -> VideoSet {
    let mut videos = VideoSet::new();
    walk(entry, pattern, &mut videos);
    videos
}

fn walk(entry: &Value, pattern: &TitlePattern, videos: &mut VideoSet) {
    if let Some(url) = entry.get("url").and_then(Value::as_str) {
        match entry.get("title").and_then(Value::as_str) {
            Some(title) if !title.is_empty() => {
                if pattern.matches(title) {
                    videos.insert(Video::new(url, title, pattern.as_str()));
                }
            }
            _ => tracing::warn!(url, "no title in listing entry"),
        }
    }
    if let Some(entries) = entry.get("entries").and_then(Value::as_array) {
        for child in entries {
            walk(child, pattern, videos);
        }
    }
}

/// Builds the catalog channel for `channel_url` from its listing.
pub fn channel_from_listing(channel_url: &str, listing: &Value, pattern: &TitlePattern) -> Result<Channel> {
    let title = listing
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .context("channel listing has no title")?;
    Ok(Channel::new(title, channel_url, collect_videos(listing, pattern)))
}
