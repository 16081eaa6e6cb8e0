use tracing_subscriber::{EnvFilter, prelude::*};

use crate::errors::{PortalError, PortalResult};

/// Initialize logging based on environment configuration
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error).
///   When unset the portal still reports startup and scan warnings at `info`.
pub fn init_logging() -> PortalResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .pretty();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| PortalError::LoggingInitialization(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        // The first call may race with other tests; the second must fail cleanly
        let _ = init_logging();
        let result = init_logging();
        assert!(matches!(result, Err(PortalError::LoggingInitialization(_))));
    }
}
