//! Line-based corpus populator
//!
//! Reads a text source and pushes one chunk per line into a single stream, so
//! the whole input becomes one logical streaming-mode input (or a pile of
//! independent block-mode scans). Only trailing line terminators are
//! stripped; interior bytes pass through untouched.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use eyre::{Context, Result};
use tracing::{debug, info};

use crate::writer::{CorpusSummary, CorpusWriter, WriterOptions};

/// Options for a populate run
#[derive(Debug, Clone)]
pub struct PopulateOptions {
    /// Stream every line is assigned to
    pub stream_id: u64,
    /// Sync the database file before closing it
    pub sync: bool,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            stream_id: crate::DEFAULT_STREAM_ID,
            sync: false,
        }
    }
}

/// Populate a corpus database at `output` from the lines of `input`.
///
/// A missing or unreadable input fails before any writer is opened, leaving
/// `output` untouched. An input with zero lines is "nothing to do": no writer
/// is opened, no file is created, and `Ok(None)` is returned. Otherwise every
/// line becomes one chunk of `options.stream_id` and the finished totals are
/// returned.
pub fn populate_lines(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: PopulateOptions,
) -> Result<Option<CorpusSummary>> {
    let input = input.as_ref();
    let output = output.as_ref();

    let file = File::open(input).context(format!("Failed to open input: {}", input.display()))?;
    let mut reader = BufReader::new(file);

    // Peek the first line before opening the writer, so an empty input never
    // creates an output file
    let mut line = Vec::new();
    if read_line(&mut reader, &mut line)? == 0 {
        info!(input = %input.display(), "Input has no lines; nothing to do");
        return Ok(None);
    }

    let mut writer = CorpusWriter::create_with(output, WriterOptions { sync: options.sync })
        .context(format!("Failed to create corpus database: {}", output.display()))?;
    let mut lines = 0u64;
    loop {
        writer.add_chunk(options.stream_id, &line)?;
        lines += 1;
        if read_line(&mut reader, &mut line)? == 0 {
            break;
        }
    }
    debug!(lines, stream_id = options.stream_id, "Submitted all lines");

    let summary = writer.finish()?;
    info!(
        input = %input.display(),
        output = %output.display(),
        chunks = summary.chunk_count,
        "Populated corpus database"
    );
    Ok(Some(summary))
}

/// Read one line into `buf` with trailing `\n` / `\r\n` stripped. Returns the
/// number of raw bytes consumed (0 at end of input).
fn read_line(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> std::io::Result<usize> {
    buf.clear();
    let n = reader.read_until(b'\n', buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(n)
}
