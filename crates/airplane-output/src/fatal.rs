//! Terminate-on-error variants of the stdout output functions.
//!
//! For task code with nothing better to do on failure than stop. The error is
//! logged, printed to stderr with context, and the process exits with
//! [`Error::exit_code`].

#![forbid(unsafe_code)]

use serde::Serialize;
use tracing::error;

use crate::{outputs::stdout_outputs, Error, PathSegment, Result};

/// Unwrap `result`, or report `context: error` and exit.
pub fn or_exit<T>(result: Result<T>, context: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => exit_with(&err, context),
    }
}

fn exit_with(err: &Error, context: &str) -> ! {
    error!(error = %err, exit_code = err.exit_code(), "{context}");
    #[allow(clippy::print_stderr)]
    {
        eprintln!("Error: {context}: {err}");
    }
    #[allow(clippy::exit)]
    std::process::exit(err.exit_code())
}

/// [`crate::set_output`], exiting the process on error.
pub fn must_set_output<T>(value: &T, path: &[PathSegment])
where
    T: Serialize + ?Sized,
{
    or_exit(stdout_outputs().set(value, path), "setting output");
}

/// [`crate::append_output`], exiting the process on error.
pub fn must_append_output<T>(value: &T, path: &[PathSegment])
where
    T: Serialize + ?Sized,
{
    or_exit(stdout_outputs().append(value, path), "appending output");
}

/// Legacy named output, exiting the process on error.
#[deprecated(note = "use must_set_output or must_append_output with a path instead")]
pub fn must_named_output<T>(name: &str, value: &T)
where
    T: Serialize + ?Sized,
{
    or_exit(
        stdout_outputs().named(name, value),
        &format!("writing output {name}"),
    );
}

/// Legacy unnamed output, exiting the process on error.
#[deprecated(note = "use must_set_output or must_append_output instead")]
pub fn must_output<T>(value: &T)
where
    T: Serialize + ?Sized,
{
    or_exit(stdout_outputs().output(value), "writing output");
}
