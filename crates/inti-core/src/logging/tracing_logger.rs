//! Logger that forwards into `tracing`

use super::traits::Logger;

/// Bridges the `Logger` trait onto `tracing` events
///
/// The host decides where events go (the CLI installs a stderr fmt
/// subscriber); without a subscriber everything is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "inti", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "inti", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "inti", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "inti", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_without_subscriber() {
        let logger = TracingLogger::new();
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
