//! Runs one scenario against the process-wide stdout handle.
//!
//! ```text
//! output-scenarios <scenario>
//! ```
//!
//! Used by `tests/stdout_emission.rs` to observe what a task process really
//! prints and how it exits.

#![allow(deprecated)]
#![forbid(unsafe_code)]

use std::{collections::BTreeMap, env, process, thread};

use airplane_output::{append_output, must_named_output, must_output, must_set_output, path};

const THREADS: usize = 8;
const PER_THREAD: usize = 25;

/// Exit code for an unknown scenario (`EX_USAGE`).
const USAGE: i32 = 64;

fn main() {
    let scenario = env::args().nth(1).unwrap_or_default();

    match scenario.as_str() {
        "must-named-bad-name" => must_named_output("bad-name", &1),
        "must-set-unencodable" => must_set_output(&unencodable(), &path!["x"]),
        "must-output-unencodable" => must_output(&unencodable()),
        "concurrent-append" => concurrent_append(),
        other => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("unknown scenario: {other:?}");
            }
            #[allow(clippy::exit)]
            process::exit(USAGE);
        }
    }
}

/// A map keyed by tuples has no JSON form.
fn unencodable() -> BTreeMap<(i32, i32), &'static str> {
    BTreeMap::from([((1, 2), "pair")])
}

/// `THREADS` threads each append `PER_THREAD` values through the shared handle.
fn concurrent_append() {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            thread::spawn(move || {
                (0..PER_THREAD).try_for_each(|i| {
                    let value = format!("thread {t} emission {i} ").repeat(4);
                    append_output(&value, &path!["t", t, i])
                })
            })
        })
        .collect();

    let failed = handles
        .into_iter()
        .map(thread::JoinHandle::join)
        .filter(|joined| !matches!(joined, Ok(Ok(()))))
        .count();

    if failed > 0 {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("{failed} emitting threads failed");
        }
        #[allow(clippy::exit)]
        process::exit(1);
    }
}
