//! Chunked framing of protocol lines.
//!
//! A line that fits the chunk size goes out as-is. A longer line is cut into
//! byte slices, each sent as
//!
//! ```text
//! airplane_chunk:<key> <slice>
//! ```
//!
//! followed by `airplane_chunk_end:<key>`. The runner concatenates the slices
//! for a key in arrival order to get the original line back.
//!
//! Slicing works on bytes, not characters: a slice may end in the middle of a
//! UTF-8 sequence, so frames are kept as raw bytes.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::fmt;

use uuid::Uuid;

pub const CHUNK_PREFIX: &str = "airplane_chunk";
pub const CHUNK_END_PREFIX: &str = "airplane_chunk_end";

/// Correlation key shared by every frame of one chunked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkKey(Uuid);

impl ChunkKey {
    /// A fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The terminated lines that make up one logical emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frames {
    /// The line fit; one line, newline included.
    Single(Vec<u8>),
    /// The line was split: chunk frames then the end marker, newlines included.
    Chunked { key: ChunkKey, lines: Vec<Vec<u8>> },
}

impl Frames {
    #[must_use]
    pub fn lines(&self) -> &[Vec<u8>] {
        match self {
            Self::Single(line) => std::slice::from_ref(line),
            Self::Chunked { lines, .. } => lines,
        }
    }

    #[must_use]
    pub const fn key(&self) -> Option<ChunkKey> {
        match self {
            Self::Single(_) => None,
            Self::Chunked { key, .. } => Some(*key),
        }
    }

    #[must_use]
    pub const fn is_chunked(&self) -> bool {
        matches!(self, Self::Chunked { .. })
    }
}

/// Frame `line` for the wire, generating a key if it must be split.
///
/// A `chunk_size` of zero is treated as one.
#[must_use]
pub fn frame_line(line: &str, chunk_size: usize) -> Frames {
    if fits(line, chunk_size) {
        return single(line);
    }
    frame_line_with_key(line, chunk_size, ChunkKey::generate())
}

/// Frame `line` for the wire using `key` if it must be split.
#[must_use]
pub fn frame_line_with_key(line: &str, chunk_size: usize, key: ChunkKey) -> Frames {
    if fits(line, chunk_size) {
        return single(line);
    }

    let key_text = key.to_string();
    let chunk_header = format!("{CHUNK_PREFIX}:{key_text} ");

    let lines = line
        .as_bytes()
        .chunks(chunk_size.max(1))
        .map(|slice| {
            let mut frame = Vec::with_capacity(chunk_header.len() + slice.len() + 1);
            frame.extend_from_slice(chunk_header.as_bytes());
            frame.extend_from_slice(slice);
            frame.push(b'\n');
            frame
        })
        .chain(std::iter::once(
            format!("{CHUNK_END_PREFIX}:{key_text}\n").into_bytes(),
        ))
        .collect();

    Frames::Chunked { key, lines }
}

const fn fits(line: &str, chunk_size: usize) -> bool {
    line.len() <= chunk_size
}

fn single(line: &str) -> Frames {
    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    Frames::Single(bytes)
}
