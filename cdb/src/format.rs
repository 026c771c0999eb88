//! On-disk layout of a corpus database file.
//!
//! A database is a single file laid out as:
//!
//! ```text
//! header (8B)   magic + format version
//! payloads      chunk bytes concatenated in write order, no delimiters
//! index         one 24B entry per chunk, in write order
//! footer (24B)  index offset + chunk count + magic + version
//! ```
//!
//! All integers are little-endian. Chunk boundaries live in the index, never
//! in the payload bytes, so a reader can enumerate streams without scanning
//! payload content.

/// File magic, present in both the header and the footer.
pub const MAGIC: [u8; 4] = *b"CDB1";

/// Current format version.
pub const VERSION: u32 = 1;

/// Byte length of the file header (magic + version).
pub const HEADER_LEN: u64 = 8;

/// Byte length of one index entry.
pub const INDEX_ENTRY_LEN: u64 = 24;

/// Byte length of the footer.
pub const FOOTER_LEN: u64 = 24;

/// Encoded file header.
pub fn header() -> [u8; HEADER_LEN as usize] {
    let mut buf = [0u8; HEADER_LEN as usize];
    buf[..4].copy_from_slice(&MAGIC);
    buf[4..].copy_from_slice(&VERSION.to_le_bytes());
    buf
}

/// One chunk's entry in the structural index.
///
/// `offset` is absolute from the start of the file. The chunk's position
/// within its stream is not stored; readers derive it from entry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub stream_id: u64,
    pub offset: u64,
    pub len: u64,
}

impl IndexEntry {
    pub fn encode(&self) -> [u8; INDEX_ENTRY_LEN as usize] {
        let mut buf = [0u8; INDEX_ENTRY_LEN as usize];
        buf[..8].copy_from_slice(&self.stream_id.to_le_bytes());
        buf[8..16].copy_from_slice(&self.offset.to_le_bytes());
        buf[16..].copy_from_slice(&self.len.to_le_bytes());
        buf
    }

    pub fn decode(buf: &[u8; INDEX_ENTRY_LEN as usize]) -> Self {
        Self {
            stream_id: u64::from_le_bytes(buf[..8].try_into().unwrap()),
            offset: u64::from_le_bytes(buf[8..16].try_into().unwrap()),
            len: u64::from_le_bytes(buf[16..].try_into().unwrap()),
        }
    }
}

/// Trailing fixed-size record locating the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer {
    pub index_offset: u64,
    pub chunk_count: u64,
}

impl Footer {
    pub fn encode(&self) -> [u8; FOOTER_LEN as usize] {
        let mut buf = [0u8; FOOTER_LEN as usize];
        buf[..8].copy_from_slice(&self.index_offset.to_le_bytes());
        buf[8..16].copy_from_slice(&self.chunk_count.to_le_bytes());
        buf[16..20].copy_from_slice(&MAGIC);
        buf[20..].copy_from_slice(&VERSION.to_le_bytes());
        buf
    }

    /// Decode a footer, returning `None` if the trailing magic or version
    /// does not match this format.
    pub fn decode(buf: &[u8; FOOTER_LEN as usize]) -> Option<Self> {
        if buf[16..20] != MAGIC {
            return None;
        }
        if u32::from_le_bytes(buf[20..].try_into().unwrap()) != VERSION {
            return None;
        }
        Some(Self {
            index_offset: u64::from_le_bytes(buf[..8].try_into().unwrap()),
            chunk_count: u64::from_le_bytes(buf[8..16].try_into().unwrap()),
        })
    }
}
