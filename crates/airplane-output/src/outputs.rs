//! Emitting output commands to a sink.
//!
//! [`Outputs`] owns a sink and an [`EmitterConfig`]. Each call builds one
//! command, frames its line and writes the frames as a single sequence. Calls
//! share nothing but the sink, so a handle can be used from many threads.
//!
//! The free functions ([`set_output`] and friends) go through a process-wide
//! handle on stdout, configured from the environment on first use.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::sync::LazyLock;

use serde::Serialize;
use tracing::{debug, error, trace, warn};

use crate::{
    chunk::frame_line,
    command::Command,
    config::EmitterConfig,
    path::PathSegment,
    sink::{OutputSink, StdoutSink},
    Result,
};

#[derive(Debug, Default)]
pub struct Outputs<S> {
    sink: S,
    config: EmitterConfig,
}

impl<S: OutputSink> Outputs<S> {
    #[must_use]
    pub const fn new(sink: S, config: EmitterConfig) -> Self {
        Self { sink, config }
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    #[must_use]
    pub const fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Set the output, or the part of it at `path`. An empty path sets the
    /// whole output.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `value` has no JSON form. Nothing is written
    /// in that case.
    pub fn set<T>(&self, value: &T, path: &[PathSegment]) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        Command::set(value, path).map(|cmd| self.emit(&cmd))
    }

    /// Append to the output, or to the array at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `value` has no JSON form.
    pub fn append<T>(&self, value: &T, path: &[PathSegment]) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        Command::append(value, path).map(|cmd| self.emit(&cmd))
    }

    /// Legacy output grouped under `name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if `name` is not empty and not made of
    /// `[A-Za-z0-9_]`, and `Serialization` if `value` has no JSON form.
    pub fn named<T>(&self, name: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        Command::named(name, value).map(|cmd| self.emit(&cmd))
    }

    /// Legacy unnamed output.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `value` has no JSON form.
    pub fn output<T>(&self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.named("", value)
    }

    /// Write a built command.
    pub fn emit(&self, command: &Command) {
        trace!(kind = %command.kind(), header = %command.header(), "emitting output command");
        self.emit_line(&command.to_line());
    }

    /// Frame and write one protocol line built by [`Command::to_line`], which
    /// never contains a raw line break.
    ///
    /// Write failures are logged, not returned: the runner is the only reader
    /// and there is nobody else to report them to.
    fn emit_line(&self, line: &str) {
        let frames = frame_line(line, self.config.chunk_size);

        if let Some(key) = frames.key() {
            debug!(
                chunk_key = %key,
                frames = frames.lines().len(),
                line_len = line.len(),
                "splitting output line into chunks"
            );
        }

        if let Err(e) = self.sink.write_frames(&frames, self.config.flush_on_emit) {
            error!(error = %e, "failed to write output");
        }
    }
}

// ============================================================================
// PROCESS-WIDE STDOUT
// ============================================================================

static STDOUT_OUTPUTS: LazyLock<Outputs<StdoutSink>> = LazyLock::new(|| {
    let config = EmitterConfig::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring output configuration from environment");
        EmitterConfig::default()
    });
    Outputs::new(StdoutSink::new(), config)
});

/// Handle on process stdout.
pub fn stdout_outputs() -> &'static Outputs<StdoutSink> {
    &STDOUT_OUTPUTS
}

/// Set the task output on stdout, or the part of it at `path`.
///
/// # Errors
///
/// Returns `Serialization` if `value` has no JSON form.
pub fn set_output<T>(value: &T, path: &[PathSegment]) -> Result<()>
where
    T: Serialize + ?Sized,
{
    stdout_outputs().set(value, path)
}

/// Append to the task output on stdout, or to the array at `path`.
///
/// # Errors
///
/// Returns `Serialization` if `value` has no JSON form.
pub fn append_output<T>(value: &T, path: &[PathSegment]) -> Result<()>
where
    T: Serialize + ?Sized,
{
    stdout_outputs().append(value, path)
}

/// Legacy named output on stdout.
///
/// # Errors
///
/// Returns `InvalidName` or `Serialization`.
#[deprecated(note = "use set_output or append_output with a path instead")]
pub fn named_output<T>(name: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    stdout_outputs().named(name, value)
}

/// Legacy unnamed output on stdout.
///
/// # Errors
///
/// Returns `Serialization` if `value` has no JSON form.
#[deprecated(note = "use set_output or append_output instead")]
pub fn output<T>(value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    stdout_outputs().output(value)
}
