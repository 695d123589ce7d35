//! CLI for chanfetch.

mod commands;
mod progress;

use anyhow::Result;
use chanfetch_core::config::{self, ChanfetchConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use commands::{run_completions, run_download, run_extract, run_manpage};

/// Top-level CLI for chanfetch.
#[derive(Debug, Parser)]
#[command(name = "chanfetch")]
#[command(about = "chanfetch: paced, resumable audio downloads from channel catalogs", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/chanfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the audio of every catalog video not yet on disk.
    Download {
        /// Catalog file (YAML) listing channels and their videos.
        #[arg(long, value_name = "PATH")]
        input_file: PathBuf,

        /// Root directory for downloaded audio; one subdirectory per channel.
        #[arg(long, value_name = "DIR")]
        output_dir: PathBuf,

        /// Minimum wait in seconds after a successful download (config default 10).
        #[arg(long, value_name = "SECS")]
        min_wait: Option<u64>,

        /// Maximum wait in seconds after a successful download (config default 60).
        #[arg(long, value_name = "SECS")]
        max_wait: Option<u64>,

        /// Only download from these channels (names are normalized before matching).
        #[arg(long, num_args = 0.., value_name = "NAME")]
        only_channels: Vec<String>,
    },

    /// Extract a channel's videos and append them to a catalog file.
    Extract {
        /// Channel URL to list.
        #[arg(long, value_name = "URL")]
        channel_url: String,

        /// Keep only videos whose title matches this regex at its start.
        #[arg(long, default_value = ".*", value_name = "REGEX")]
        title_regex: String,

        /// Catalog file to create or append to.
        #[arg(long, value_name = "PATH")]
        output_file: PathBuf,
    },

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Manpage,
}

fn load_config(path: Option<&Path>) -> Result<ChanfetchConfig> {
    let cfg = match path {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Download {
                input_file,
                output_dir,
                min_wait,
                max_wait,
                only_channels,
            } => {
                let cfg = load_config(cli.config.as_deref())?;
                let min_wait = min_wait.unwrap_or(cfg.pacing.min_wait_secs);
                let max_wait = max_wait.unwrap_or(cfg.pacing.max_wait_secs);
                run_download(&cfg, input_file, output_dir, min_wait, max_wait, only_channels)
                    .await?;
            }
            CliCommand::Extract {
                channel_url,
                title_regex,
                output_file,
            } => {
                let cfg = load_config(cli.config.as_deref())?;
                run_extract(&cfg, channel_url, title_regex, output_file).await?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
