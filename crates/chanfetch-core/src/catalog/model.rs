//! Channel and video entities.

use serde::{Deserialize, Serialize};

use super::normalize;

/// One video of a channel, as recorded at extraction time.
///
/// Equality is structural over all three fields, so re-extracting the same
/// listing never produces duplicate entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Video {
    /// Remote locator handed to the fetcher.
    pub url: String,
    /// Human-readable title; may contain arbitrary Unicode.
    pub title: String,
    /// Title filter that matched this video during extraction (provenance only).
    pub title_pattern: String,
}

impl Video {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        title_pattern: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            title_pattern: title_pattern.into(),
        }
    }
}

/// Insertion-ordered set of videos.
///
/// Iteration follows first-seen order; inserting a video equal to one already
/// present is a no-op. Serialized as a plain sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Video>", into = "Vec<Video>")]
pub struct VideoSet {
    items: Vec<Video>,
}

impl VideoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `video` unless an equal one is present. Returns true if it was added.
    pub fn insert(&mut self, video: Video) -> bool {
        if self.items.contains(&video) {
            return false;
        }
        self.items.push(video);
        true
    }

    pub fn contains(&self, video: &Video) -> bool {
        self.items.contains(video)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Video> {
        self.items.iter()
    }
}

impl FromIterator<Video> for VideoSet {
    fn from_iter<I: IntoIterator<Item = Video>>(iter: I) -> Self {
        let mut set = VideoSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Video> for VideoSet {
    fn extend<I: IntoIterator<Item = Video>>(&mut self, iter: I) {
        for video in iter {
            self.insert(video);
        }
    }
}

impl From<Vec<Video>> for VideoSet {
    fn from(videos: Vec<Video>) -> Self {
        videos.into_iter().collect()
    }
}

impl From<VideoSet> for Vec<Video> {
    fn from(set: VideoSet) -> Self {
        set.items
    }
}

impl IntoIterator for VideoSet {
    type Item = Video;
    type IntoIter = std::vec::IntoIter<Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a VideoSet {
    type Item = &'a Video;
    type IntoIter = std::slice::Iter<'a, Video>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A channel and the videos extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub videos: VideoSet,
}

impl Channel {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        videos: impl IntoIterator<Item = Video>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            videos: videos.into_iter().collect(),
        }
    }

    /// Bucket key: the normalized title. Two channels with the same key share
    /// an output directory and a scheduler slot.
    pub fn key(&self) -> String {
        normalize(&self.title)
    }
}

/// Top-level catalog document: `channels: [...]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Catalog {
    /// Total number of videos across all channels.
    pub fn video_count(&self) -> usize {
        self.channels.iter().map(|c| c.videos.len()).sum()
    }

    pub fn contains_channel_url(&self, url: &str) -> bool {
        self.channels.iter().any(|c| c.url == url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(n: u32) -> Video {
        Video::new(
            format!("https://example.com/watch?v={n}"),
            format!("Episode {n}"),
            ".*",
        )
    }

    #[test]
    fn video_equality_is_structural() {
        assert_eq!(video(1), video(1));
        let mut other = video(1);
        other.title_pattern = "Episode.*".to_string();
        assert_ne!(video(1), other);
    }

    #[test]
    fn video_set_drops_duplicates_and_keeps_first_seen_order() {
        let set: VideoSet = vec![video(3), video(1), video(3), video(2), video(1)].into();
        let titles: Vec<&str> = set.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, ["Episode 3", "Episode 1", "Episode 2"]);
    }

    #[test]
    fn insert_reports_whether_added() {
        let mut set = VideoSet::new();
        assert!(set.insert(video(1)));
        assert!(!set.insert(video(1)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&video(1)));
    }

    #[test]
    fn channel_key_is_normalized_title() {
        let ch = Channel::new("Mr Wissen 2go", "https://example.com/@mw", []);
        assert_eq!(ch.key(), "mr_wissen_2go");
    }

    #[test]
    fn catalog_counts_and_url_lookup() {
        let catalog = Catalog {
            channels: vec![
                Channel::new("A", "https://example.com/a", [video(1), video(2)]),
                Channel::new("B", "https://example.com/b", [video(3)]),
            ],
        };
        assert_eq!(catalog.video_count(), 3);
        assert!(catalog.contains_channel_url("https://example.com/b"));
        assert!(!catalog.contains_channel_url("https://example.com/c"));
    }
}
