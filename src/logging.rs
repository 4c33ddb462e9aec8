//! Logging setup for the command line tool.
//!
//! Diagnostics go to stderr through [`tracing`]; the verbosity is read from the
//! `STRUCT2SEQ_LOG` environment variable.

use std::str::FromStr;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace` or `off`).
pub const LOG_ENV: &str = "STRUCT2SEQ_LOG";

/// Level used when [`LOG_ENV`] is unset or unparsable.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Resolve the level filter from the value of [`LOG_ENV`].
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install a compact stderr subscriber. Calling it again is a no-op.
pub fn setup_logging() {
    let level = level_from_env(std::env::var(LOG_ENV).ok().as_deref());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(level)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_read_from_env_value() {
        assert_eq!(level_from_env(Some("debug")), LevelFilter::DEBUG);
        assert_eq!(level_from_env(Some("TRACE")), LevelFilter::TRACE);
        assert_eq!(level_from_env(Some("off")), LevelFilter::OFF);
    }

    #[test]
    fn unknown_levels_fall_back_to_default() {
        assert_eq!(level_from_env(None), DEFAULT_LEVEL);
        assert_eq!(level_from_env(Some("loud")), DEFAULT_LEVEL);
    }

    #[test]
    fn setup_can_run_twice() {
        setup_logging();
        setup_logging();
        tracing::warn!("logging is set up");
    }
}
