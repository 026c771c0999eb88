//! CLI argument parsing for corpusdb

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cdb")]
#[command(author, version, about = "Corpus database builder for benchmark replay", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Populate a corpus database from a line-oriented text file
    Populate {
        /// Input text file (one chunk per line)
        #[arg(required = true)]
        input: PathBuf,

        /// Output corpus database path
        #[arg(required = true)]
        output: PathBuf,

        /// Stream id all lines are assigned to (default from config)
        #[arg(short, long)]
        stream_id: Option<u64>,

        /// Sync the database file before closing it
        #[arg(long)]
        sync: bool,
    },

    /// Show totals for a corpus database
    Stats {
        /// Corpus database path
        #[arg(required = true)]
        corpus: PathBuf,
    },

    /// List streams with per-stream chunk and byte counts
    Streams {
        /// Corpus database path
        #[arg(required = true)]
        corpus: PathBuf,
    },

    /// Print chunk payloads, one per line
    Cat {
        /// Corpus database path
        #[arg(required = true)]
        corpus: PathBuf,

        /// Only print chunks of this stream
        #[arg(short, long)]
        stream_id: Option<u64>,
    },
}
