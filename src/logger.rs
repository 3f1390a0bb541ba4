//! Logging initialisation via tracing-subscriber.
//!
//! The active filter comes from the first source that is set, in order:
//! `-v` flags, `RUST_LOG`, `[app] log_level`. Whichever source wins must
//! parse as an `EnvFilter` directive; startup fails otherwise.

use std::env;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber (stderr) for the given `-v` count and the
/// configured level.
pub fn init(verbosity: u8, config_level: &str) -> Result<(), AppError> {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = select_filter(level_for_verbosity(verbosity), rust_log.as_deref(), config_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))
}

/// Pick and parse the filter directive. Blank sources are skipped.
fn select_filter(
    cli_level: Option<&str>,
    rust_log: Option<&str>,
    config_level: &str,
) -> Result<EnvFilter, AppError> {
    let (source, directive) = [("-v", cli_level), ("RUST_LOG", rust_log), ("log_level", Some(config_level))]
        .into_iter()
        .find_map(|(source, d)| d.map(str::trim).filter(|d| !d.is_empty()).map(|d| (source, d)))
        .ok_or_else(|| AppError::Logger("no log level configured".into()))?;

    EnvFilter::try_new(directive)
        .map_err(|e| AppError::Logger(format!("invalid {source} filter '{directive}': {e}")))
}

/// `-v` warn, `-vv` info, `-vvv` debug, more is trace. Zero means unset.
fn level_for_verbosity(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_tiers() {
        assert_eq!(level_for_verbosity(0), None);
        assert_eq!(level_for_verbosity(1), Some("warn"));
        assert_eq!(level_for_verbosity(3), Some("debug"));
        assert_eq!(level_for_verbosity(9), Some("trace"));
    }

    #[test]
    fn cli_flag_beats_env_and_config() {
        let f = select_filter(Some("trace"), Some("warn"), "info").unwrap();
        assert_eq!(f.to_string(), "trace");
    }

    #[test]
    fn rust_log_beats_config() {
        let f = select_filter(None, Some("expert_ask=debug"), "info").unwrap();
        assert_eq!(f.to_string(), "expert_ask=debug");
    }

    #[test]
    fn blank_rust_log_falls_through_to_config() {
        let f = select_filter(None, Some("  "), "warn").unwrap();
        assert_eq!(f.to_string(), "warn");
    }

    #[test]
    fn invalid_winning_source_is_named() {
        let msg = select_filter(None, None, "info=notalevel").unwrap_err().to_string();
        assert!(msg.contains("log_level"), "got {msg}");
    }

    #[test]
    fn nothing_configured_errors() {
        assert!(select_filter(None, None, "   ").is_err());
    }

    #[test]
    fn init_succeeds_or_already_init() {
        // Another test in this process may have installed a subscriber first.
        match init(0, "info") {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
