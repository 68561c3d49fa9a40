//! CLI for the iconfetch skill icon downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use iconfetch_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_pages, run_rename};

/// Top-level CLI for iconfetch.
#[derive(Debug, Parser)]
#[command(name = "iconfetch")]
#[command(about = "iconfetch: download skill tree icons and normalize their filenames", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scrape pages and download their skill icons by category.
    Fetch {
        /// Names of configured pages to fetch (see `iconfetch pages`).
        pages: Vec<String>,

        /// Fetch every configured page.
        #[arg(long, conflicts_with = "pages")]
        all: bool,

        /// Base output directory (defaults to `output_dir` from config.toml).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Rename downloaded passive skill icons to `Row_<n>-<Type>-<Name>.png`.
    Rename {
        /// Directory to walk (defaults to `output_dir` from config.toml).
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        /// Report what would be renamed without touching any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// List configured pages.
    Pages,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                pages,
                all,
                output_dir,
            } => run_fetch(&cfg, &pages, all, output_dir.as_deref())?,
            CliCommand::Rename { base_dir, dry_run } => {
                run_rename(&cfg, base_dir.as_deref(), dry_run)?
            }
            CliCommand::Pages => run_pages(&cfg),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
