use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{DiagnosticLogger, Severity, diagnostic};

/// Forwards `log` crate records to a [`DiagnosticLogger`].
///
/// Levels map onto the syslog scale: `Error` to ERR, `Warn` to WARNING,
/// `Info` to INFO, `Debug` to DEBUG and `Trace` one step past DEBUG.
pub struct DiagnosticBridge {
    logger: &'static DiagnosticLogger,
}

impl DiagnosticBridge {
    pub const fn new(logger: &'static DiagnosticLogger) -> Self {
        Self { logger }
    }

    /// Installs this bridge as the `log` crate's global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }
}

impl Log for DiagnosticBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger.is_enabled(Severity::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        self.logger.log(
            Severity::from(record.level()),
            record.file().unwrap_or(record.target()),
            record.line().unwrap_or(0),
            *record.args(),
        );
    }

    fn flush(&self) {}
}

/// Routes `log::error!` through `log::trace!` to the process-wide diagnostic logger.
pub fn init_log_bridge() -> Result<(), SetLoggerError> {
    DiagnosticBridge::new(diagnostic()).install()
}

#[cfg(test)]
mod tests {
    use ipmilog_core::LogCapture;

    use super::*;

    fn leaked(threshold: Severity) -> (&'static DiagnosticLogger, LogCapture) {
        let capture = LogCapture::new();
        let logger = DiagnosticLogger::with_writer(threshold, capture.clone());
        (Box::leak(Box::new(logger)), capture)
    }

    #[test]
    fn test_bridge_forwards_location_and_level() {
        let (logger, capture) = leaked(Severity::INFO);
        let bridge = DiagnosticBridge::new(logger);
        bridge.log(
            &Record::builder()
                .level(log::Level::Warn)
                .file(Some("sdr.rs"))
                .line(Some(77))
                .args(format_args!("sensor {} missing", 3))
                .build(),
        );
        bridge.log(
            &Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("filtered"))
                .build(),
        );
        assert_eq!(capture.lines(), vec!["[sdr.rs:77]<WARN> sensor 3 missing"]);
    }

    #[test]
    fn test_bridge_enabled_follows_threshold() {
        let (logger, _) = leaked(Severity::DEBUG);
        let bridge = DiagnosticBridge::new(logger);
        let metadata = |level| Metadata::builder().level(level).build();
        assert!(bridge.enabled(&metadata(log::Level::Error)));
        assert!(bridge.enabled(&metadata(log::Level::Debug)));
        assert!(!bridge.enabled(&metadata(log::Level::Trace)));
    }
}
