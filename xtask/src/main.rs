// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod build_manifest;
mod rewrite_urls;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use manifest::config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Jukebox manifest tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the collections folder and write music-data.json
    BuildManifest {
        /// Directory with one subfolder per collection
        #[arg(long, default_value = config::SONGS_DIR)]
        songs_dir: PathBuf,
        /// Manifest file to (over)write
        #[arg(long, default_value = config::MANIFEST_FILE)]
        output: PathBuf,
        /// Prefix of every cover path, as the web page sees the collections folder
        #[arg(long, default_value = config::SONGS_DIR)]
        cover_root: String,
    },
    /// Point every track in music-data.json at its archive.org download
    RewriteUrls {
        /// Manifest file to rewrite in place
        #[arg(long, default_value = config::MANIFEST_FILE)]
        manifest: PathBuf,
        /// archive.org item the tracks are uploaded to
        #[arg(long, default_value = config::DEFAULT_ARCHIVE_ITEM_ID)]
        archive_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildManifest {
            songs_dir,
            output,
            cover_root,
        } => build_manifest::run(&songs_dir, &output, cover_root),
        Commands::RewriteUrls {
            manifest,
            archive_id,
        } => rewrite_urls::run(&manifest, &archive_id),
    }
}
