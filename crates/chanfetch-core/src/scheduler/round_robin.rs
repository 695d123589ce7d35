//! Fair rotation across channels.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::catalog::{Channel, Video};
use crate::state::PendingDownload;

/// Owns one FIFO queue per channel key and a rotation cursor.
///
/// Each turn looks at `keys[cursor % keys.len()]` and advances the cursor
/// whether or not that queue still has entries, so every channel gets one
/// slot per full rotation. Exhausted queues stay in the rotation and are
/// skipped.
#[derive(Debug, Default)]
pub struct RoundRobinScheduler {
    queues: HashMap<String, VecDeque<Video>>,
    channels: HashMap<String, Arc<Channel>>,
    keys: Vec<String>,
    cursor: usize,
}

impl RoundRobinScheduler {
    /// Groups `pending` by channel key, keeping first-seen key order and the
    /// per-channel order of `pending`.
    ///
    /// Channels whose titles normalize to the same key share one queue; the
    /// first-seen channel represents the bucket.
    pub fn new(pending: Vec<PendingDownload>) -> Self {
        let mut scheduler = Self::default();
        for PendingDownload { channel, video } in pending {
            let key = channel.key();
            if !scheduler.channels.contains_key(&key) {
                scheduler.keys.push(key.clone());
                scheduler.channels.insert(key.clone(), channel);
            }
            scheduler.queues.entry(key).or_default().push_back(video);
        }
        scheduler
    }

    pub fn has_pending(&self) -> bool {
        self.queues.values().any(|q| !q.is_empty())
    }

    /// Items not yet handed out.
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Channel keys in rotation order.
    pub fn channel_keys(&self) -> &[String] {
        &self.keys
    }

    /// Next (channel, video) in rotation, or None once every queue is empty.
    pub fn next_download(&mut self) -> Option<PendingDownload> {
        while self.has_pending() {
            let key = &self.keys[self.cursor % self.keys.len()];
            self.cursor += 1;

            let Some(video) = self.queues.get_mut(key).and_then(VecDeque::pop_front) else {
                continue;
            };
            let channel = Arc::clone(&self.channels[key]);
            return Some(PendingDownload { channel, video });
        }
        None
    }
}

impl Iterator for RoundRobinScheduler {
    type Item = PendingDownload;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_download()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(spec: &[(&str, usize)]) -> Vec<PendingDownload> {
        let mut out = Vec::new();
        for (title, count) in spec {
            let videos: Vec<Video> = (1..=*count)
                .map(|i| Video::new(format!("https://example.com/{title}/{i}"), format!("{title}{i}"), ".*"))
                .collect();
            let channel = Arc::new(Channel::new(*title, format!("https://example.com/{title}"), videos));
            for video in channel.videos.iter() {
                out.push(PendingDownload {
                    channel: Arc::clone(&channel),
                    video: video.clone(),
                });
            }
        }
        out
    }

    fn order(scheduler: RoundRobinScheduler) -> Vec<String> {
        scheduler.map(|p| p.video.title).collect()
    }

    #[test]
    fn interleaves_and_skips_exhausted_channels() {
        let scheduler = RoundRobinScheduler::new(pending(&[("A", 3), ("B", 1), ("C", 2)]));
        assert_eq!(scheduler.remaining(), 6);
        assert_eq!(order(scheduler), ["A1", "B1", "C1", "A2", "C2", "A3"]);
    }

    #[test]
    fn equal_depths_alternate_strictly() {
        let scheduler = RoundRobinScheduler::new(pending(&[("A", 2), ("B", 2)]));
        assert_eq!(order(scheduler), ["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn single_channel_drains_in_fifo_order() {
        let scheduler = RoundRobinScheduler::new(pending(&[("Solo", 3)]));
        assert_eq!(order(scheduler), ["Solo1", "Solo2", "Solo3"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut scheduler = RoundRobinScheduler::new(Vec::new());
        assert!(!scheduler.has_pending());
        assert!(scheduler.next_download().is_none());
    }

    #[test]
    fn keys_are_first_seen_order() {
        let mut items = pending(&[("B", 1), ("A", 1)]);
        items.extend(pending(&[("B", 1)]));
        let scheduler = RoundRobinScheduler::new(items);
        assert_eq!(scheduler.channel_keys(), ["b", "a"]);
    }

    #[test]
    fn colliding_titles_share_one_slot() {
        let mut items = pending(&[("Same Name", 2)]);
        let other = Arc::new(Channel::new(
            "same  name!",
            "https://example.com/other",
            [Video::new("https://example.com/x", "X", ".*")],
        ));
        items.push(PendingDownload {
            channel: Arc::clone(&other),
            video: other.videos.iter().next().unwrap().clone(),
        });
        items.extend(pending(&[("Z", 1)]));

        let scheduler = RoundRobinScheduler::new(items);
        assert_eq!(scheduler.channel_keys(), ["same_name", "z"]);
        let picked: Vec<(String, String)> = scheduler
            .map(|p| (p.channel.title.clone(), p.video.title))
            .collect();
        assert_eq!(
            picked,
            [
                ("Same Name".to_string(), "Same Name1".to_string()),
                ("Z".to_string(), "Z1".to_string()),
                ("Same Name".to_string(), "Same Name2".to_string()),
                ("Same Name".to_string(), "X".to_string()),
            ]
        );
    }

    #[test]
    fn every_item_is_handed_out_exactly_once() {
        let items = pending(&[("A", 5), ("B", 2), ("C", 7), ("D", 1)]);
        let mut expected: Vec<String> = items.iter().map(|p| p.video.url.clone()).collect();
        let mut got: Vec<String> = RoundRobinScheduler::new(items).map(|p| p.video.url).collect();
        expected.sort();
        got.sort();
        assert_eq!(got, expected);
    }
}
