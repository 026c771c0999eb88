//! Corpus database writer
//!
//! Single-use builder: chunks go in via [`CorpusWriter::add_chunk`], the
//! structural index is written once by [`CorpusWriter::finish`], and the
//! writer rejects everything after that. Payload bytes hit the target file as
//! they arrive; only index entries and per-stream counters stay resident, so
//! population never needs the whole corpus in memory.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CorpusError, Result};
use crate::format::{self, Footer, IndexEntry};

/// Options for creating a writer
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Call `sync_all` on the file before closing it in `finish`
    pub sync: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { sync: false }
    }
}

/// Totals reported by a successful `finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusSummary {
    /// Number of chunks written
    pub chunk_count: u64,
    /// Number of distinct streams
    pub stream_count: u64,
    /// Total payload bytes, excluding header/index/footer
    pub payload_bytes: u64,
}

/// Builder for a corpus database file
#[derive(Debug)]
pub struct CorpusWriter {
    path: PathBuf,
    // None once finish has released the handle
    out: Option<BufWriter<File>>,
    index: Vec<IndexEntry>,
    // stream id -> chunks seen so far; next chunk's position within the stream
    stream_counts: BTreeMap<u64, u64>,
    // absolute offset of the next payload byte
    written: u64,
    finished: bool,
    sync: bool,
}

impl CorpusWriter {
    /// Begin a new corpus database at `path`, truncating anything already
    /// there. No data is durable until `finish` succeeds.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with(path, WriterOptions::default())
    }

    /// As `create`, with explicit options.
    pub fn create_with(path: impl AsRef<Path>, options: WriterOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut out = BufWriter::new(file);
        out.write_all(&format::header())?;
        debug!(?path, "Created corpus database writer");
        Ok(Self {
            path,
            out: Some(out),
            index: Vec::new(),
            stream_counts: BTreeMap::new(),
            written: format::HEADER_LEN,
            finished: false,
            sync: options.sync,
        })
    }

    /// Append `payload` as the next chunk of stream `stream_id`.
    ///
    /// A previously unseen `stream_id` implicitly starts a new stream whose
    /// first chunk has position 0. Bytes are stored exactly as submitted.
    pub fn add_chunk(&mut self, stream_id: u64, payload: &[u8]) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Err(CorpusError::Finished);
        };
        out.write_all(payload)?;
        self.index.push(IndexEntry {
            stream_id,
            offset: self.written,
            len: payload.len() as u64,
        });
        self.written += payload.len() as u64;
        let seq = self.stream_counts.entry(stream_id).or_insert(0);
        debug!(stream_id, seq = *seq, len = payload.len(), "Added chunk");
        *seq += 1;
        Ok(())
    }

    /// Number of chunks added so far.
    pub fn chunk_count(&self) -> u64 {
        self.index.len() as u64
    }

    /// Write the index and footer, flush, and close the database.
    ///
    /// Fails with [`CorpusError::EmptyCorpus`] if no chunks were ever added
    /// (removing the unusable file), and with [`CorpusError::Finished`] if
    /// called twice. The writer is unusable after this returns, whether it
    /// succeeded or not.
    pub fn finish(&mut self) -> Result<CorpusSummary> {
        if self.finished {
            return Err(CorpusError::Finished);
        }
        self.finished = true;
        let Some(mut out) = self.out.take() else {
            return Err(CorpusError::Finished);
        };

        if self.index.is_empty() {
            drop(out);
            let _ = fs::remove_file(&self.path);
            return Err(CorpusError::EmptyCorpus);
        }

        for entry in &self.index {
            out.write_all(&entry.encode())?;
        }
        let footer = Footer {
            index_offset: self.written,
            chunk_count: self.index.len() as u64,
        };
        out.write_all(&footer.encode())?;
        out.flush()?;
        if self.sync {
            out.get_ref().sync_all()?;
        }
        drop(out);

        let summary = CorpusSummary {
            chunk_count: self.index.len() as u64,
            stream_count: self.stream_counts.len() as u64,
            payload_bytes: self.written - format::HEADER_LEN,
        };
        info!(
            path = %self.path.display(),
            chunks = summary.chunk_count,
            streams = summary.stream_count,
            bytes = summary.payload_bytes,
            "Finished corpus database"
        );
        Ok(summary)
    }
}
