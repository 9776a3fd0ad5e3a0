//! Paraty CLI binary.
//!
//! Provides the command-line interface for the Paraty fundamental ranking
//! engine.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "paraty")]
#[command(about = "Fundamental ranking engine for B3 equities", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank the full universe
    Rank {
        /// Number of companies to display
        #[arg(short, long, default_value = "15")]
        top: usize,

        /// Order by the signed (penalized) score instead of the truncated one
        #[arg(long)]
        penalized: bool,

        /// Force a fresh snapshot download (ignore today's cache)
        #[arg(long)]
        no_cache: bool,

        /// Skip the quality screen (profitability, growth, liquidity)
        #[arg(long)]
        no_screen: bool,

        /// File listing tickers to exclude, one per line
        #[arg(long)]
        ignore_file: Option<PathBuf>,

        /// Write the full scored table to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Snapshot cache directory
        #[arg(long, default_value = data::DEFAULT_CACHE_DIR)]
        cache_dir: PathBuf,
    },

    /// Show per-subsector reference statistics
    Sectors {
        /// Force a fresh snapshot download (ignore today's cache)
        #[arg(long)]
        no_cache: bool,

        /// Skip the quality screen
        #[arg(long)]
        no_screen: bool,

        /// Snapshot cache directory
        #[arg(long, default_value = data::DEFAULT_CACHE_DIR)]
        cache_dir: PathBuf,
    },

    /// Show the indicator weight structure
    Weights,

    /// List the available ceiling-price methodologies
    Methods,

    /// Download a fresh snapshot into the cache
    Fetch {
        /// Snapshot cache directory
        #[arg(long, default_value = data::DEFAULT_CACHE_DIR)]
        cache_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            top,
            penalized,
            no_cache,
            no_screen,
            ignore_file,
            export,
            format,
            cache_dir,
        } => {
            cmd::rank::run(
                top,
                penalized,
                !no_cache,
                !no_screen,
                ignore_file,
                export,
                &format,
                &cache_dir,
            )
            .await?;
        }
        Commands::Sectors {
            no_cache,
            no_screen,
            cache_dir,
        } => {
            cmd::sectors::run(!no_cache, !no_screen, &cache_dir).await?;
        }
        Commands::Weights => {
            cmd::weights::run();
        }
        Commands::Methods => {
            cmd::methods::run();
        }
        Commands::Fetch { cache_dir } => {
            cmd::fetch::run(&cache_dir).await?;
        }
    }

    Ok(())
}
