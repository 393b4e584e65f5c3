//! airplane-emit - write Airplane task outputs from shell tasks
//!
//! ```text
//! airplane-emit set -p rows -p 0 --value '{"id": 1}'
//! echo '"done"' | airplane-emit append -p log
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

use std::process;

mod cli;
mod handlers;
mod setup;

fn main() {
    if let Err(e) = setup::init_tracing() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Warning: {e}");
        }
    }

    let matches = cli::build_cli().get_matches();

    if let Err(err) = handlers::dispatch(&matches) {
        tracing::error!(error = %err, "airplane-emit failed");
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {err:#}");
        }

        let code = err
            .downcast_ref::<airplane_output::Error>()
            .map_or(1, airplane_output::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
