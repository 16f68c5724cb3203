use std::{fmt, io};

use ipmilog_core::{
    LOG_NAME_DEFAULT, LogStderr, LogWriter, Severity, format_located, format_with_error,
};

use crate::SessionConfig;

/// Live session logger state. Either fully built or absent.
struct SessionState {
    name: String,
    daemon: bool,
    level: Severity,
    writer: Box<dyn LogWriter + Send>,
}

impl SessionState {
    fn open(config: SessionConfig) -> Self {
        let SessionConfig {
            name,
            daemon,
            verbosity,
            writer,
        } = config;
        let name = name.unwrap_or_else(|| LOG_NAME_DEFAULT.to_owned());
        let writer = match writer {
            Some(writer) => writer,
            None if daemon => open_syslog(&name),
            None => Box::new(LogStderr),
        };
        Self {
            name,
            daemon,
            level: Severity::NOTICE.raised(verbosity),
            writer,
        }
    }
}

#[cfg(unix)]
fn open_syslog(name: &str) -> Box<dyn LogWriter + Send> {
    Box::new(ipmilog_core::SyslogWriter::open(name))
}

#[cfg(not(unix))]
fn open_syslog(_: &str) -> Box<dyn LogWriter + Send> {
    Box::new(LogStderr)
}

/// User-facing logger writing `[file:line] message` records to stderr, or to
/// syslog in daemon mode.
///
/// The logger starts absent. [`init`](Self::init) builds it once, [`halt`](Self::halt)
/// tears it down, and any other call on an absent logger first builds it with
/// the defaults: default name, stderr, verbosity 0.
///
/// A record at `level` is written when `level <= threshold`; the threshold is
/// [`Severity::NOTICE`] raised by the verbosity.
#[derive(Default)]
pub struct SessionLogger {
    state: Option<SessionState>,
}

impl SessionLogger {
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Builds the logger. Does nothing if it is already initialized.
    pub fn init(&mut self, name: Option<&str>, daemon: bool, verbosity: i32) {
        self.init_with(
            SessionConfig::default()
                .maybe_with_name(name)
                .with_daemon(daemon)
                .with_verbosity(verbosity),
        );
    }

    /// Builds the logger from a [`SessionConfig`]. Does nothing if it is already initialized.
    ///
    /// Returns whether this call built the logger.
    pub fn init_with(&mut self, config: SessionConfig) -> bool {
        if self.state.is_some() {
            return false;
        }
        self.state = Some(SessionState::open(config));
        true
    }

    /// Releases the logger and closes the syslog connection in daemon mode.
    pub fn halt(&mut self) {
        self.state = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_daemon(&self) -> bool {
        self.state.as_ref().is_some_and(|state| state.daemon)
    }

    pub fn name(&self) -> Option<&str> {
        self.state.as_ref().map(|state| state.name.as_str())
    }

    pub fn level(&mut self) -> Severity {
        self.state().level
    }

    pub fn set_level(&mut self, level: Severity) {
        self.state().level = level;
    }

    /// Whether a record at `level` passes the threshold.
    pub fn enabled(&mut self, level: Severity) -> bool {
        self.state().level.allows(level)
    }

    /// Writes an already formatted record, without filtering.
    pub fn write(&mut self, level: Severity, record: &str) {
        self.state().writer.regular(level, record);
    }

    /// Writes `[file:line] message`, truncated to [`ipmilog_core::LOG_MSG_LENGTH`].
    pub fn log(&mut self, level: Severity, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            let message = format_located(file, line, args);
            self.write(level, message.as_str());
        }
    }

    /// Writes `message: <description of the last OS error>`.
    ///
    /// The OS error is read on entry. Callers that make system calls between
    /// the failure and this call should capture it themselves and use
    /// [`log_os_error`](Self::log_os_error).
    pub fn log_errno(&mut self, level: Severity, args: fmt::Arguments<'_>) {
        let error = io::Error::last_os_error();
        self.log_os_error(level, &error, args);
    }

    /// Writes `message: <description of error>`.
    pub fn log_os_error(&mut self, level: Severity, error: &io::Error, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            let message = format_with_error(args, error);
            self.write(level, &message);
        }
    }

    fn state(&mut self) -> &mut SessionState {
        self.state
            .get_or_insert_with(|| SessionState::open(SessionConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use ipmilog_core::LogCapture;

    use super::*;

    fn captured(verbosity: i32) -> (SessionLogger, LogCapture) {
        let capture = LogCapture::new();
        let mut logger = SessionLogger::new();
        logger.init_with(
            SessionConfig::default()
                .with_name("test")
                .with_verbosity(verbosity)
                .with_writer(capture.clone()),
        );
        (logger, capture)
    }

    #[test]
    fn test_init_sets_threshold_from_verbosity() {
        let (mut logger, _) = captured(0);
        assert_eq!(logger.level(), Severity::NOTICE);
        let (mut logger, _) = captured(2);
        assert_eq!(logger.level(), Severity::DEBUG);
        assert_eq!(logger.name(), Some("test"));
        assert!(!logger.is_daemon());
    }

    #[test]
    fn test_init_is_idempotent() {
        let (mut logger, _) = captured(1);
        assert!(!logger.init_with(SessionConfig::default().with_name("again")));
        logger.init(Some("other"), false, 5);
        assert_eq!(logger.name(), Some("test"));
        assert_eq!(logger.level(), Severity::INFO);
    }

    #[test]
    fn test_default_name() {
        let mut logger = SessionLogger::new();
        assert_eq!(logger.name(), None);
        logger.init(None, false, 0);
        assert_eq!(logger.name(), Some(LOG_NAME_DEFAULT));
    }

    #[test]
    fn test_log_formats_location_prefix() {
        let (mut logger, capture) = captured(0);
        logger.log(Severity::ERR, "ipmi_main.c", 42, format_args!("no {} found", "BMC"));
        assert_eq!(capture.lines(), vec!["[ipmi_main.c:42] no BMC found"]);
        assert_eq!(capture.records()[0].0, Severity::ERR);
    }

    #[test]
    fn test_log_suppresses_levels_above_threshold() {
        for verbosity in 0..4 {
            for level in 0..10 {
                let (mut logger, capture) = captured(verbosity);
                logger.log(Severity(level), "f.c", 1, format_args!("x"));
                let threshold = Severity::NOTICE.value() + verbosity;
                assert_eq!(capture.lines().len(), usize::from(level <= threshold));
            }
        }
    }

    #[test]
    fn test_enabled_and_write() {
        let (mut logger, capture) = captured(0);
        assert!(logger.enabled(Severity::NOTICE));
        assert!(!logger.enabled(Severity::INFO));
        logger.write(Severity::DEBUG, "unfiltered");
        assert_eq!(capture.lines(), vec!["unfiltered"]);
    }

    #[test]
    fn test_set_level() {
        let (mut logger, capture) = captured(0);
        logger.log(Severity::DEBUG, "f.c", 1, format_args!("hidden"));
        logger.set_level(Severity::DEBUG);
        logger.log(Severity::DEBUG, "f.c", 2, format_args!("shown"));
        logger.set_level(Severity::EMERG);
        logger.log(Severity::ERR, "f.c", 3, format_args!("hidden"));
        assert_eq!(capture.lines(), vec!["[f.c:2] shown"]);
    }

    #[test]
    fn test_log_truncates_long_messages() {
        let (mut logger, capture) = captured(0);
        let long = "a".repeat(5000);
        logger.log(Severity::ERR, "f.c", 7, format_args!("{long}"));
        let line = &capture.lines()[0];
        assert_eq!(line.len(), ipmilog_core::LOG_MSG_LENGTH - 1);
        assert!(line.starts_with("[f.c:7] aaa"));
    }

    #[test]
    fn test_log_os_error_appends_current_error() {
        let (mut logger, capture) = captured(0);
        let not_found = io::Error::from_raw_os_error(2);
        let denied = io::Error::from_raw_os_error(13);
        logger.log_os_error(Severity::ERR, &not_found, format_args!("open {}", "/dev/ipmi0"));
        logger.log_os_error(Severity::ERR, &denied, format_args!("open {}", "/dev/ipmi0"));
        logger.log_os_error(Severity::DEBUG, &denied, format_args!("filtered"));
        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!("open /dev/ipmi0: {}", ipmilog_core::describe_os_error(&not_found))
        );
        assert_eq!(
            lines[1],
            format!("open /dev/ipmi0: {}", ipmilog_core::describe_os_error(&denied))
        );
        assert_ne!(lines[0], lines[1]);
    }

    #[test]
    fn test_log_errno_has_no_location_prefix() {
        let (mut logger, capture) = captured(0);
        logger.log_errno(Severity::ERR, format_args!("ioctl failed"));
        let line = &capture.lines()[0];
        assert!(line.starts_with("ioctl failed: "));
    }

    #[test]
    fn test_halt_then_log_reinitializes_with_defaults() {
        let (mut logger, capture) = captured(3);
        logger.halt();
        assert!(!logger.is_initialized());
        logger.halt();
        logger.log(Severity::DEBUG, "f.c", 1, format_args!("dropped"));
        assert!(logger.is_initialized());
        assert!(!logger.is_daemon());
        assert_eq!(logger.name(), Some(LOG_NAME_DEFAULT));
        assert_eq!(logger.level(), Severity::NOTICE);
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn test_level_on_absent_logger_initializes() {
        let mut logger = SessionLogger::new();
        assert_eq!(logger.level(), Severity::NOTICE);
        assert!(logger.is_initialized());
    }
}
