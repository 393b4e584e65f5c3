//! Output sinks for framed protocol lines
//!
//! A sink receives one logical emission at a time and writes every line of it
//! without letting another emission in between. Chunk frames carry no length
//! prefix, so two interleaved chunked emissions would corrupt each other.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::{
    io::{self, Write},
    sync::Mutex,
};

use crate::chunk::Frames;

/// Destination for framed emissions.
pub trait OutputSink: Send + Sync {
    /// Write all lines of `frames` as one uninterrupted sequence.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing or flushing fails.
    fn write_frames(&self, frames: &Frames, flush: bool) -> io::Result<()>;
}

fn write_all_lines<W>(writer: &mut W, frames: &Frames, flush: bool) -> io::Result<()>
where
    W: Write + ?Sized,
{
    frames
        .lines()
        .iter()
        .try_for_each(|line| writer.write_all(line))?;

    if flush {
        writer.flush()?;
    }
    Ok(())
}

/// Process stdout, the channel the runner reads.
///
/// The stdout lock is held across the whole sequence, which also keeps out
/// any other code in the process printing through `std::io::stdout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StdoutSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OutputSink for StdoutSink {
    fn write_frames(&self, frames: &Frames, flush: bool) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_all_lines(&mut handle, frames, flush)
    }
}

/// Any writer, serialized by a mutex.
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if a writer thread panicked while holding the lock.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| io::Error::other("WriterSink lock poisoned"))
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write_frames(&self, frames: &Frames, flush: bool) -> io::Result<()> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("WriterSink lock poisoned"))?;
        write_all_lines(&mut *guard, frames, flush)
    }
}
