//! `chanfetch extract` – list a channel and append it to a catalog file.

use anyhow::Result;
use chanfetch_core::config::ChanfetchConfig;
use chanfetch_core::extract::{extract_channel, ExtractRequest, YtDlpExtractor};
use chanfetch_core::ytdlp::YtDlp;
use std::path::PathBuf;

pub async fn run_extract(
    cfg: &ChanfetchConfig,
    channel_url: String,
    title_regex: String,
    output_file: PathBuf,
) -> Result<()> {
    let extractor = YtDlpExtractor::new(YtDlp::from_config(&cfg.fetch));
    let request = ExtractRequest {
        channel_url,
        title_regex,
        output_file,
    };
    let channel = extract_channel(&extractor, &request).await?;
    println!(
        "Added channel '{}' with {} video(s) to {}",
        channel.title,
        channel.videos.len(),
        request.output_file.display()
    );
    Ok(())
}
