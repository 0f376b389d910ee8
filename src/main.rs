//! rollbook entry point
//!
//! Parses arguments, runs the command, and exits non-zero on any error.
//! Startup failures (bad config, unreachable store, bind failure) end here.

use rollbook::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
