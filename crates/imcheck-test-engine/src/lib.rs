//! # imcheck-test-engine
//!
//! Drives an imcheck UI the way a user would. Tests are registered as flat
//! scripts of [`Step`]s naming widgets by label path (`"Test Window/Combo"`).
//! Each frame the engine writes synthetic input into the [`Context`] before
//! the UI runs, then reads the item registry and the application state after.
//!
//! ```rust,ignore
//! let mut engine = TestEngine::<AppState>::new(EngineConfig::default());
//! engine.register("Demo", "Checkbox")
//!     .set_ref("Test Window")
//!     .item_click("Test Checkbox")
//!     .check("checkbox is on", |s| check_eq(s.checkbox_value, true));
//! engine.queue_all();
//!
//! loop {
//!     engine.pre_frame(&mut ctx, &mut state);
//!     ctx.frame(font, 1.0, |ui| show_app(ui, &mut state));
//!     engine.post_frame(&mut ctx, &mut state);
//!     if engine.is_queue_empty() { break; }
//! }
//! ```
//!
//! [`Context`]: imcheck_core::Context

pub mod engine;
pub mod ops;
pub mod script;
pub mod window;

pub use engine::{EngineConfig, TestEngine, TestResult, TestSummary};
pub use ops::InputOp;
pub use script::{Step, TestBuilder, TestCase};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    NotRun,
    Queued,
    Running,
    Passed,
    Failed,
    /// Stopped by [`TestEngine::stop`] before finishing.
    Aborted,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotRun  => "not run",
            Self::Queued  => "queued",
            Self::Running => "running",
            Self::Passed  => "passed",
            Self::Failed  => "failed",
            Self::Aborted => "aborted",
        }
    }
}

// ─── Error ───────────────────────────────────────────────────────────────────

/// Why a test failed. Failures are recorded and logged, never propagated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TestError {
    #[error("item '{path}' not found after {frames} frames")]
    ItemNotFound { path: String, frames: u32 },
    #[error("check '{description}' failed: {reason}")]
    CheckFailed { description: String, reason: String },
    #[error("test still running after {frames} frames")]
    Timeout { frames: u32 },
}

// ─── Check helpers ───────────────────────────────────────────────────────────

/// Result type returned by [`Step::Check`] predicates.
pub type CheckResult = Result<(), String>;

pub fn check_eq<T: PartialEq + std::fmt::Debug>(actual: T, expected: T) -> CheckResult {
    if actual == expected { Ok(()) } else { Err(format!("expected {expected:?}, got {actual:?}")) }
}

pub fn check_approx(actual: f32, expected: f32, eps: f32) -> CheckResult {
    if (actual - expected).abs() <= eps {
        Ok(())
    } else {
        Err(format!("expected {expected} ± {eps}, got {actual}"))
    }
}

pub fn check_true(cond: bool, what: &str) -> CheckResult {
    if cond { Ok(()) } else { Err(format!("{what} is false")) }
}

pub mod prelude {
    pub use super::{
        check_approx, check_eq, check_true, CheckResult, EngineConfig, TestEngine, TestError,
        TestStatus,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_helpers_describe_the_mismatch() {
        assert!(check_eq(3, 3).is_ok());
        assert_eq!(check_eq(1, 2), Err(String::from("expected 2, got 1")));
        assert!(check_approx(0.2501, 0.25, 0.01).is_ok());
        assert!(check_approx(0.5, 0.25, 0.01).is_err());
        assert!(check_true(false, "open").is_err_and(|e| e.contains("open")));
    }

    #[test]
    fn errors_render_their_context() {
        let e = TestError::ItemNotFound { path: "W/Missing".into(), frames: 30 };
        assert_eq!(e.to_string(), "item 'W/Missing' not found after 30 frames");
    }
}
