//! In-memory sink for capturing emissions
//!
//! Production code writes to stdout through [`crate::StdoutSink`]; tests hand an
//! [`crate::Outputs`] a [`MemorySink`] and inspect what would have been printed.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::{io, sync::RwLock};

use crate::{chunk::Frames, sink::OutputSink};

/// Test sink that captures raw output bytes.
///
/// Uses interior mutability via `RwLock` so it can be shared between threads
/// without requiring `&mut self`.
///
/// # Example
///
/// ```
/// use airplane_output::{path, test_utils::MemorySink, EmitterConfig, Outputs};
///
/// let outputs = Outputs::new(MemorySink::new(), EmitterConfig::default());
/// outputs.set(&42, &path!["answer"]).unwrap();
///
/// assert_eq!(outputs.sink().lines(), vec!["airplane_output_set:answer 42"]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink(pub RwLock<Vec<u8>>);

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.0
            .read()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    /// Remove and return everything written so far.
    #[must_use]
    pub fn take_bytes(&self) -> Vec<u8> {
        self.0
            .write()
            .map_or_else(|_| Vec::new(), |mut guard| std::mem::take(&mut *guard))
    }

    /// Written lines without terminators, decoded lossily.
    ///
    /// A chunk frame cut inside a multi-byte character shows up with
    /// replacement characters here; use [`Self::bytes`] for exact content.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.bytes())
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().map_or(true, |guard| guard.is_empty())
    }
}

impl OutputSink for MemorySink {
    fn write_frames(&self, frames: &Frames, _flush: bool) -> io::Result<()> {
        let mut guard = self
            .0
            .write()
            .map_err(|_| io::Error::other("MemorySink lock poisoned"))?;
        frames
            .lines()
            .iter()
            .for_each(|line| guard.extend_from_slice(line));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::frame_line;

    #[test]
    fn memory_sink_captures_lines() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.write_frames(&frame_line("first", 8192), true).unwrap();
        sink.write_frames(&frame_line("second", 8192), true).unwrap();

        assert_eq!(sink.lines(), vec!["first", "second"]);
        assert!(!sink.is_empty());
    }

    #[test]
    fn memory_sink_take_bytes_empties() {
        let sink = MemorySink::new();
        sink.write_frames(&frame_line("x", 8192), true).unwrap();

        assert_eq!(sink.take_bytes(), b"x\n");
        assert!(sink.is_empty());
    }
}
