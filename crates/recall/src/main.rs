//! # Recall CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/recallapp/`: library with the row client, filter engine and commands
//! - `crates/recall/`: this CLI, one client of that library
//!
//! Everything from the library's `api.rs` inward is UI agnostic. The CLI owns
//! argument parsing, logging setup, rendering, the browser hand-off and exit
//! codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
