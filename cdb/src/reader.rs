//! Corpus database reader
//!
//! Read-only view over a finished database. A benchmark driver either walks
//! [`Corpus::blocks`] in write order (block mode, every chunk an independent
//! scan) or [`Corpus::streams`] (streaming mode, a stream's chunks
//! concatenated in order into one logical input). Structural metadata comes
//! from the index alone; payload bytes are never parsed for boundaries.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CorpusError, Result};
use crate::format::{self, Footer, IndexEntry};

/// One chunk as seen by a block-mode scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Global position in write order, from 0
    pub id: u64,
    /// Caller-assigned stream identifier
    pub stream_id: u64,
    /// Position within the stream, from 0
    pub stream_index: u64,
    pub payload: Vec<u8>,
}

/// One stream with its chunks in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub id: u64,
    pub chunks: Vec<Vec<u8>>,
}

/// Index-only per-stream totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub id: u64,
    pub chunk_count: u64,
    pub payload_bytes: u64,
}

/// A finished, immutable corpus database.
#[derive(Debug)]
pub struct Corpus {
    path: PathBuf,
    file: File,
    entries: Vec<IndexEntry>,
    // stream ids by first appearance in write order
    stream_order: Vec<u64>,
}

impl Corpus {
    /// Open and validate a corpus database.
    ///
    /// Validation covers magic and version at both ends, the footer's
    /// geometry against the actual file length, and that the index entries
    /// tile the payload region exactly in write order.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path)?;
        let file_len = file.metadata()?.len();

        let min_len = format::HEADER_LEN + format::INDEX_ENTRY_LEN + format::FOOTER_LEN;
        if file_len < min_len {
            return Err(CorpusError::corrupt(&path, "file too short"));
        }

        let mut header = [0u8; format::HEADER_LEN as usize];
        file.read_exact(&mut header)?;
        if header != format::header() {
            return Err(CorpusError::corrupt(&path, "header magic or version mismatch"));
        }

        let mut footer_buf = [0u8; format::FOOTER_LEN as usize];
        file.seek(SeekFrom::End(-(format::FOOTER_LEN as i64)))?;
        file.read_exact(&mut footer_buf)?;
        let Some(footer) = Footer::decode(&footer_buf) else {
            return Err(CorpusError::corrupt(&path, "footer magic or version mismatch"));
        };

        if footer.chunk_count == 0 {
            return Err(CorpusError::corrupt(&path, "zero chunks"));
        }
        let index_len = footer
            .chunk_count
            .checked_mul(format::INDEX_ENTRY_LEN)
            .ok_or_else(|| CorpusError::corrupt(&path, "chunk count overflow"))?;
        let expected_len = footer
            .index_offset
            .checked_add(index_len)
            .and_then(|n| n.checked_add(format::FOOTER_LEN))
            .ok_or_else(|| CorpusError::corrupt(&path, "index offset overflow"))?;
        if footer.index_offset < format::HEADER_LEN || expected_len != file_len {
            return Err(CorpusError::corrupt(&path, "footer geometry does not match file length"));
        }

        file.seek(SeekFrom::Start(footer.index_offset))?;
        let mut entries = Vec::with_capacity(footer.chunk_count as usize);
        let mut stream_order = Vec::new();
        let mut seen = BTreeSet::new();
        let mut next_offset = format::HEADER_LEN;
        let mut buf = [0u8; format::INDEX_ENTRY_LEN as usize];
        for _ in 0..footer.chunk_count {
            file.read_exact(&mut buf)?;
            let entry = IndexEntry::decode(&buf);
            if entry.offset != next_offset {
                return Err(CorpusError::corrupt(&path, "index entries do not tile payload region"));
            }
            next_offset = next_offset
                .checked_add(entry.len)
                .ok_or_else(|| CorpusError::corrupt(&path, "index entries do not tile payload region"))?;
            if seen.insert(entry.stream_id) {
                stream_order.push(entry.stream_id);
            }
            entries.push(entry);
        }
        if next_offset != footer.index_offset {
            return Err(CorpusError::corrupt(&path, "payload region does not reach index"));
        }

        debug!(
            path = %path.display(),
            chunks = entries.len(),
            streams = stream_order.len(),
            "Opened corpus database"
        );
        Ok(Self {
            path,
            file,
            entries,
            stream_order,
        })
    }

    /// Path this corpus was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn chunk_count(&self) -> u64 {
        self.entries.len() as u64
    }

    pub fn stream_count(&self) -> u64 {
        self.stream_order.len() as u64
    }

    pub fn payload_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.len).sum()
    }

    /// Stream ids in order of first appearance.
    pub fn stream_ids(&self) -> &[u64] {
        &self.stream_order
    }

    /// Per-stream totals in first-appearance order, from the index alone.
    pub fn stream_summaries(&self) -> Vec<StreamSummary> {
        let mut by_id: BTreeMap<u64, StreamSummary> = BTreeMap::new();
        for entry in &self.entries {
            let summary = by_id.entry(entry.stream_id).or_insert(StreamSummary {
                id: entry.stream_id,
                chunk_count: 0,
                payload_bytes: 0,
            });
            summary.chunk_count += 1;
            summary.payload_bytes += entry.len;
        }
        self.stream_order.iter().map(|id| by_id[id]).collect()
    }

    /// Every chunk in write order, with stream positions derived from the
    /// index.
    pub fn blocks(&mut self) -> Result<Vec<Block>> {
        self.file.seek(SeekFrom::Start(format::HEADER_LEN))?;
        let mut blocks = Vec::with_capacity(self.entries.len());
        let mut positions: BTreeMap<u64, u64> = BTreeMap::new();
        for (id, entry) in self.entries.iter().enumerate() {
            let mut payload = vec![0u8; entry.len as usize];
            self.file.read_exact(&mut payload)?;
            let pos = positions.entry(entry.stream_id).or_insert(0);
            blocks.push(Block {
                id: id as u64,
                stream_id: entry.stream_id,
                stream_index: *pos,
                payload,
            });
            *pos += 1;
        }
        Ok(blocks)
    }

    /// Streams in first-appearance order, each with chunks in original order.
    pub fn streams(&mut self) -> Result<Vec<Stream>> {
        let blocks = self.blocks()?;
        let mut by_id: BTreeMap<u64, Vec<Vec<u8>>> = BTreeMap::new();
        for block in blocks {
            by_id.entry(block.stream_id).or_default().push(block.payload);
        }
        Ok(self
            .stream_order
            .iter()
            .map(|id| Stream {
                id: *id,
                chunks: by_id.remove(id).unwrap_or_default(),
            })
            .collect())
    }
}
