//! torrent-builder CLI
//!
//! Hashes a file or directory and writes `<name>.torrent` next to where it is
//! run from.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use torrent_builder::constants::{DEFAULT_ANNOUNCE, DEFAULT_CREATED_BY, DEFAULT_PIECE_LENGTH};
use torrent_builder::create::write_torrent;
use torrent_builder::TorrentBuilder;

/// Create a BitTorrent metainfo file for a file or directory
#[derive(Parser)]
#[command(name = "torrent-builder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File or directory to describe
    target: PathBuf,

    /// Tracker announce URL
    #[arg(long, default_value = DEFAULT_ANNOUNCE)]
    announce: String,

    /// Value of the `createdby` field
    #[arg(long, default_value = DEFAULT_CREATED_BY)]
    created_by: String,

    /// Piece length in bytes
    #[arg(long, default_value_t = DEFAULT_PIECE_LENGTH)]
    piece_length: u64,

    /// Directory the .torrent file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output (implies --verbose)
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let builder = TorrentBuilder::new()
        .announce(cli.announce)
        .created_by(cli.created_by)
        .piece_length(cli.piece_length);

    let record = builder
        .build(&cli.target)
        .await
        .with_context(|| format!("failed to build torrent for {}", cli.target.display()))?;

    let info_hash = record
        .info_hash()
        .context("failed to encode info dictionary")?;

    let written = write_torrent(&record, &cli.output_dir).with_context(|| {
        format!("failed to write torrent to {}", cli.output_dir.display())
    })?;

    info!(
        info_hash = %info_hash,
        pieces = record.info.pieces.len(),
        bytes = record.info.total_length(),
        "torrent created"
    );
    println!("{}", written.display());

    Ok(())
}
