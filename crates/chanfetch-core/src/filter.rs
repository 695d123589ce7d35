//! Channel filter stage (`--only-channels`).

use std::collections::HashSet;

use crate::catalog::{normalize, Channel};

/// Keeps channels whose normalized title equals the normalized form of one
/// of `names`. An empty `names` passes every channel through unchanged.
pub fn filter_channels(channels: Vec<Channel>, names: &[String]) -> Vec<Channel> {
    if names.is_empty() {
        return channels;
    }
    let wanted: HashSet<String> = names.iter().map(|n| normalize(n)).collect();
    channels
        .into_iter()
        .filter(|c| wanted.contains(&c.key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> Vec<Channel> {
        vec![
            Channel::new("Mr Wissen2go", "https://example.com/@mw", []),
            Channel::new("Terra X History", "https://example.com/@tx", []),
            Channel::new("Kurzgesagt", "https://example.com/@kg", []),
        ]
    }

    fn titles(channels: &[Channel]) -> Vec<&str> {
        channels.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn no_names_passes_everything_in_order() {
        let out = filter_channels(channels(), &[]);
        assert_eq!(titles(&out), ["Mr Wissen2go", "Terra X History", "Kurzgesagt"]);
    }

    #[test]
    fn names_match_after_normalization() {
        let out = filter_channels(channels(), &["mr_wissen2go".to_string()]);
        assert_eq!(titles(&out), ["Mr Wissen2go"]);

        let out = filter_channels(
            channels(),
            &["TERRA  x history!".to_string(), "kurzgesagt".to_string()],
        );
        assert_eq!(titles(&out), ["Terra X History", "Kurzgesagt"]);
    }

    #[test]
    fn unmatched_names_yield_empty() {
        let out = filter_channels(channels(), &["nobody".to_string()]);
        assert!(out.is_empty());
    }
}
