use std::io::Write;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use corpusdb::Corpus;
use corpusdb::cli::{Cli, Command};
use corpusdb::config::Config;
use corpusdb::populate::{PopulateOptions, populate_lines};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("corpusdb starting");

    match cli.command {
        Command::Populate {
            input,
            output,
            stream_id,
            sync,
        } => {
            let options = PopulateOptions {
                stream_id: stream_id.unwrap_or(config.default_stream_id),
                sync: sync || config.sync_on_finish,
            };
            match populate_lines(&input, &output, options)? {
                Some(summary) => {
                    println!(
                        "{} Wrote {}: {} chunks in {} streams ({} bytes)",
                        "✓".green(),
                        output.display().to_string().cyan(),
                        summary.chunk_count,
                        summary.stream_count,
                        summary.payload_bytes
                    );
                }
                None => {
                    println!("{} has no lines; nothing to do", input.display());
                }
            }
        }
        Command::Stats { corpus } => {
            let db = Corpus::open(&corpus)?;
            println!("Corpus: {}", corpus.display().to_string().cyan());
            println!("  Chunks: {}", db.chunk_count());
            println!("  Streams: {}", db.stream_count());
            println!("  Payload bytes: {}", db.payload_bytes());
        }
        Command::Streams { corpus } => {
            let db = Corpus::open(&corpus)?;
            for summary in db.stream_summaries() {
                println!(
                    "{} {} chunks, {} bytes",
                    summary.id.to_string().yellow(),
                    summary.chunk_count,
                    summary.payload_bytes
                );
            }
        }
        Command::Cat { corpus, stream_id } => {
            let mut db = Corpus::open(&corpus)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for block in db.blocks()? {
                if let Some(want) = stream_id
                    && block.stream_id != want
                {
                    continue;
                }
                out.write_all(&block.payload)?;
                out.write_all(b"\n")?;
            }
        }
    }

    Ok(())
}
