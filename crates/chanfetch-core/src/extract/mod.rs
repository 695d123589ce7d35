//! Channel extraction: turn a channel listing into catalog entries.
//!
//! The listing comes from an external metadata collaborator (yt-dlp's flat
//! JSON dump). Entries nest arbitrarily via `entries`; every entry with a
//! `url` and a non-empty `title` matching the title pattern becomes a
//! [`Video`]. The new channel is appended to the catalog file, which is
//! append-only: a channel URL already present aborts the extraction.

mod listing;
mod ytdlp;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::catalog::{load_catalog, save_catalog, Catalog, CatalogError, Channel};

pub use listing::{channel_from_listing, collect_videos, TitlePattern};
pub use ytdlp::YtDlpExtractor;

/// Resolves a channel URL into its raw listing.
#[allow(async_fn_in_trait)]
pub trait ChannelExtractor {
    async fn extract(&self, channel_url: &str) -> Result<serde_json::Value>;
}

/// Inputs of one `extract` invocation.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub channel_url: String,
    /// Regex matched against the start of each title. `.*` keeps everything.
    pub title_regex: String,
    pub output_file: PathBuf,
}

/// Extracts one channel and appends it to `request.output_file`.
/// Returns the channel that was written.
pub async fn extract_channel<E: ChannelExtractor>(
    extractor: &E,
    request: &ExtractRequest,
) -> Result<Channel> {
    url::Url::parse(&request.channel_url)
        .with_context(|| format!("invalid channel URL: {}", request.channel_url))?;
    let pattern = TitlePattern::new(&request.title_regex)
        .with_context(|| format!("invalid title regex: {}", request.title_regex))?;

    let path = &request.output_file;
    let mut catalog = if path.exists() {
        load_catalog(path)?
    } else {
        Catalog::default()
    };
    if catalog.contains_channel_url(&request.channel_url) {
        return Err(CatalogError::DuplicateChannel {
            url: request.channel_url.clone(),
            path: path.clone(),
        }
        .into());
    }

    tracing::info!(url = %request.channel_url, "extracting channel listing");
    let listing = extractor
        .extract(&request.channel_url)
        .await
        .with_context(|| format!("extract channel listing: {}", request.channel_url))?;
    let channel = channel_from_listing(&request.channel_url, &listing, &pattern)?;
    tracing::info!(
        title = %channel.title,
        videos = channel.videos.len(),
        "extracted channel"
    );

    catalog.channels.push(channel.clone());
    save_catalog(path, &catalog)?;
    Ok(channel)
}
