//! Command-line parsing for the test application.
//!
//! Parses args by hand. Environment variables with the `IMCHECK_` prefix set
//! the defaults; explicit flags override them.

use std::env;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
imcheck test application

USAGE:
    test_app [OPTIONS]

OPTIONS:
    --test             Queue every registered UI test on startup
    --headless         Run without a window; stops once the queue is empty
    --max-frames=N     Frame limit in headless mode (default: 100)
    --help, -h         Show this help message
    --version, -V      Show version

ENVIRONMENT VARIABLES:
    IMCHECK_TEST         Same as --test (1/true)
    IMCHECK_HEADLESS     Same as --headless (1/true)
    IMCHECK_MAX_FRAMES   Override --max-frames default
    RUST_LOG             Log filter, e.g. info or test_app=debug";

pub const DEFAULT_MAX_FRAMES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub run_tests:  bool,
    pub headless:   bool,
    /// Headless frame limit. At least one frame always runs.
    pub max_frames: u32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self { run_tests: false, headless: false, max_frames: DEFAULT_MAX_FRAMES }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{}", HELP_TEXT)]
    Help,
    #[error("test_app {}", VERSION)]
    Version,
    #[error("Invalid {flag} value: {value}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("Unknown argument: {0}\nRun with --help for usage information.")]
    UnknownArg(String),
}

fn truthy(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn parse_frames(flag: &'static str, val: &str) -> Result<u32, ParseError> {
    match val.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidValue { flag, value: val.to_owned() }),
    }
}

impl LaunchConfig {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Self, ParseError> {
        Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok())
    }

    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = get_env("IMCHECK_TEST") {
            config.run_tests = truthy(&val);
        }
        if let Some(val) = get_env("IMCHECK_HEADLESS") {
            config.headless = truthy(&val);
        }
        if let Some(val) = get_env("IMCHECK_MAX_FRAMES") {
            // A bad env value keeps the default rather than aborting.
            if let Ok(n) = parse_frames("IMCHECK_MAX_FRAMES", &val) {
                config.max_frames = n;
            }
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h"    => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--test"           => config.run_tests = true,
                "--headless"       => config.headless = true,
                other => match other.strip_prefix("--max-frames=") {
                    Some(val) => config.max_frames = parse_frames("--max-frames", val)?,
                    None => return Err(ParseError::UnknownArg(other.to_owned())),
                },
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<LaunchConfig, ParseError> {
        LaunchConfig::parse_from_env_and_args(args.iter(), |key| {
            env.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
        })
    }

    #[test]
    fn no_arguments_give_the_defaults() {
        assert_eq!(parse(&[], &[]), Ok(LaunchConfig::default()));
    }

    #[test]
    fn flags_are_order_independent() {
        let c = parse(&["--headless", "--test", "--max-frames=250"], &[]);
        assert_eq!(c, Ok(LaunchConfig { run_tests: true, headless: true, max_frames: 250 }));
    }

    #[test]
    fn flags_override_environment() {
        let env = [("IMCHECK_HEADLESS", "true"), ("IMCHECK_MAX_FRAMES", "40")];
        let c = parse(&["--max-frames=7"], &env).expect("valid");
        assert!(c.headless && !c.run_tests);
        assert_eq!(c.max_frames, 7);

        let c = parse(&[], &[("IMCHECK_MAX_FRAMES", "zero"), ("IMCHECK_TEST", "1")]).expect("valid");
        assert_eq!(c.max_frames, DEFAULT_MAX_FRAMES);
        assert!(c.run_tests);
    }

    #[test]
    fn errors_render_the_user_facing_text() {
        assert_eq!(ParseError::Help.to_string(), HELP_TEXT);
        assert_eq!(ParseError::Version.to_string(), format!("test_app {VERSION}"));
        let bad = ParseError::InvalidValue { flag: "--max-frames", value: "x".into() };
        assert_eq!(bad.to_string(), "Invalid --max-frames value: x");
        assert!(ParseError::UnknownArg("--fast".into()).to_string().starts_with("Unknown argument: --fast\n"));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(parse(&["--fast"], &[]), Err(ParseError::UnknownArg("--fast".into())));
        assert_eq!(
            parse(&["--max-frames=0"], &[]),
            Err(ParseError::InvalidValue { flag: "--max-frames", value: "0".into() })
        );
        assert_eq!(parse(&["--test", "-h"], &[]), Err(ParseError::Help));
    }
}
