//! Smart Schedule - deadline-aware ordering for dependent tasks

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = smart_schedule::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
