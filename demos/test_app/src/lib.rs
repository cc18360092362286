//! test_app: the widget window, its scripted tests and the frame driver.
//!
//! Run interactively:  `cargo run -p test_app -- --test`
//! Run headless:       `cargo run -p test_app -- --test --headless`

pub mod app;
pub mod cli;
pub mod driver;
pub mod scripts;

pub use app::{show_test_window, AppState, COMBO_OPTIONS, TEXT_INPUT_CAPACITY};
pub use cli::{LaunchConfig, ParseError};
pub use driver::{run_batch, run_interactive, BatchReport, TestApp};
