//! # Vendo Entry Point
//!
//! Runs the demonstration machine. The actual setup is in `lib.rs` so it can
//! be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    match vendo_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vendo: {err}");
            ExitCode::FAILURE
        }
    }
}
