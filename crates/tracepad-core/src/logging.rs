#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! host's call. With the `tracing-json` feature, [`init_json`] installs a
//! JSON-lines subscriber filtered by the [`LOG_ENV`] environment variable.

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV: &str = "TRACEPAD_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_json();
        assert!(!init_json());
    }
}
