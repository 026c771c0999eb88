//! CorpusDB - corpus database for pattern-matching benchmark replay
//!
//! Stores text "chunks" grouped into ordered "streams" in a single immutable
//! file, so a benchmark harness can replay identical input across runs: block
//! mode scans every chunk independently, streaming mode concatenates a
//! stream's chunks in order to exercise cross-chunk engine state.
//!
//! # File layout
//!
//! ```text
//! corpus.db
//! ├── header            # magic + version
//! ├── payload region    # chunk bytes in write order, no delimiters
//! ├── index             # per-chunk (stream_id, offset, len)
//! └── footer            # index offset + chunk count + magic
//! ```
//!
//! # Example
//!
//! ```ignore
//! use corpusdb::{Corpus, CorpusWriter};
//!
//! let mut writer = CorpusWriter::create("web.db")?;
//! writer.add_chunk(0, b"GET / HTTP/1.1")?;
//! writer.add_chunk(0, b"Host: example.com")?;
//! writer.finish()?;
//!
//! let mut corpus = Corpus::open("web.db")?;
//! for stream in corpus.streams()? {
//!     // stream.chunks are in original write order
//! }
//! ```

pub mod cli;
pub mod config;
mod error;
mod format;
pub mod populate;
mod reader;
mod writer;

pub use error::{CorpusError, Result};
pub use reader::{Block, Corpus, Stream, StreamSummary};
pub use writer::{CorpusSummary, CorpusWriter, WriterOptions};

/// Stream id the line-based populator uses by default
pub const DEFAULT_STREAM_ID: u64 = 0;
