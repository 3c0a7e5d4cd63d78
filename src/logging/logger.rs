// file: src/logging/logger.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-456789jklmno

//! Logger initialization and configuration

use crate::error::OtpError;
use crate::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter directive for the given verbosity flags
pub fn filter_directive(verbose: bool, quiet: bool, default_level: &str) -> String {
    if quiet {
        "error".to_string()
    } else if verbose {
        "debug".to_string()
    } else {
        default_level.to_string()
    }
}

/// Initialize the logging system
///
/// Logs go to stderr; stdout is reserved for command results.
pub fn init_logger(verbose: bool, quiet: bool, default_level: &str) -> Result<()> {
    let directive = filter_directive(verbose, quiet, default_level);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| OtpError::config(format!("Invalid log level '{}': {}", directive, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| OtpError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Run `f` inside an `operation` span
pub fn with_operation_span<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("operation", name = operation);
    let _enter = span.enter();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(false, false, "info"), "info");
        assert_eq!(filter_directive(true, false, "info"), "debug");
        assert_eq!(filter_directive(false, true, "info"), "error");
        // quiet wins over verbose
        assert_eq!(filter_directive(true, true, "warn"), "error");
        assert_eq!(filter_directive(false, false, "warn"), "warn");
    }

    #[test]
    fn test_init_logger_rejects_bad_level() {
        let result = init_logger(false, false, "multiotp=loud");
        assert!(matches!(result, Err(OtpError::Config(_))));
    }

    #[test]
    fn test_with_operation_span() {
        let mut executed = false;

        let result = with_operation_span("test_operation", || {
            executed = true;
            "test_result"
        });

        assert!(executed);
        assert_eq!(result, "test_result");
    }
}
