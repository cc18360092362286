//! test_app: imcheck widget window with scripted UI tests.
//!
//! Run with:  `cargo run -p test_app -- --test`
//! Headless:  `cargo run -p test_app -- --test --headless --max-frames=200`

use std::process::ExitCode;

use test_app::{run_batch, run_interactive, LaunchConfig, ParseError};

/// Window system or backend could not start (-1 as a process status).
const EXIT_BACKEND_FAILURE: u8 = 255;

fn main() -> ExitCode {
    env_logger::init();

    let config = match LaunchConfig::parse() {
        Ok(c) => c,
        Err(e @ (ParseError::Help | ParseError::Version)) => {
            println!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };
    log::debug!("launch config: {config:?}");

    if config.headless {
        match run_batch(&config) {
            Ok(report) => {
                let s = report.summary;
                log::info!(
                    "{} frames, {} passed, {} failed, {} aborted",
                    report.frames, s.passed, s.failed, s.aborted
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to start headless backend: {e:#}");
                ExitCode::from(EXIT_BACKEND_FAILURE)
            }
        }
    } else {
        match run_interactive(&config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Failed to run window: {e}");
                ExitCode::from(EXIT_BACKEND_FAILURE)
            }
        }
    }
}
