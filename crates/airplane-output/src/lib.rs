//! # airplane-output
//!
//! Client side of the Airplane task output protocol. A task reports
//! structured results to its runner by printing protocol lines on stdout.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Protocol
//!
//! ```text
//! airplane_output_set[:<address>] <json>
//! airplane_output_append[:<address>] <json>
//! airplane_output[:"<name>"] <json>
//! airplane_chunk:<key> <slice>
//! airplane_chunk_end:<key>
//! ```
//!
//! - [`path`] encodes a path like `["a", 0, "b c"]` into the address `a[0]["b c"]`
//! - [`payload`] renders the value as single-line JSON
//! - [`command`] assembles the header and payload into one line
//! - [`chunk`] splits lines longer than the chunk size into correlated frames
//! - [`sink`] writes each emission's frames without interleaving
//!
//! ## Usage
//!
//! ```no_run
//! use airplane_output::{append_output, path, set_output};
//!
//! # fn main() -> airplane_output::Result<()> {
//! set_output(&serde_json::json!({"rows": []}), &[])?;
//! append_output(&"first", &path!["rows"])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Encoding and validation failures come back as [`Error`]. Write failures on
//! the output stream are logged through `tracing` and not returned. The
//! [`fatal`] helpers exit the process instead of returning.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod command;
pub mod config;
mod error;
pub mod fatal;
pub mod outputs;
pub mod path;
pub mod payload;
pub mod sink;
pub mod test_utils;

pub use chunk::{frame_line, frame_line_with_key, ChunkKey, Frames};
pub use command::{Command, CommandKind, OutputName, Target};
pub use config::{load_toml_file, EmitterConfig, DEFAULT_CHUNK_SIZE};
pub use error::{Error, Result};
#[allow(deprecated)]
pub use fatal::{must_append_output, must_named_output, must_output, must_set_output, or_exit};
#[allow(deprecated)]
pub use outputs::{append_output, named_output, output, set_output, stdout_outputs, Outputs};
pub use path::{encode_path, Address, PathSegment};
pub use payload::encode_payload;
pub use sink::{OutputSink, StdoutSink, WriterSink};
