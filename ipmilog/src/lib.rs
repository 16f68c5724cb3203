//! # ipmilog
//! Session and diagnostic loggers for command line tools and daemons.
//!
//! Two independent loggers live side by side:
//! - the **session logger** carries user-facing messages. It writes
//!   `[file:line] message` to stderr, or to syslog in daemon mode, and is set
//!   up explicitly with a name, a daemon flag and a verbosity.
//! - the **diagnostic logger** carries debug traces and buffer dumps. It reads
//!   `IPMI_LOGLEVEL` and `IPMI_LOGFILE` once, on first use, and writes
//!   `[file:line]<LABEL> message` to that file or to stderr.
//!
//! Both use the syslog severity scale, where `0` is the most severe.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! ipmilog = "0.1.0"
//! ```
//!
//! ```rust
//! use ipmilog::{Severity, lperror, lprintf, session_config};
//!
//! let _guard = session_config()
//!     .with_name("ipmitool")
//!     .with_verbosity(1)
//!     .init_global();
//! lprintf!(Severity::NOTICE, "Hello, {}!", "world");
//! lprintf!(Severity::DEBUG, "hidden until verbosity reaches 2");
//! if std::fs::File::open("/nonexistent/dev/ipmi0").is_err() {
//!     lperror!(Severity::ERR, "unable to open {}", "/dev/ipmi0");
//! }
//! // guard halts the session logger when dropped
//! ```
//!
//! ## Debug traces and buffer dumps
//! ```rust
//! use ipmilog::{ipmi_buffer_debug, ipmi_debug};
//!
//! // Printed only when IPMI_LOGLEVEL is 7 or more.
//! ipmi_debug!("sending request, netfn {:#x}", 0x06);
//! ipmi_buffer_debug!(b"\x20\x18\xc8\x81\x04\x01", " request");
//! ipmi_buffer_debug!([0u8; 20]);
//! ```
//!
//! ## Explicit loggers
//! Both loggers are plain values as well, so a component can own one instead
//! of using the process-wide instances.
//!
//! ```rust
//! use ipmilog::{DiagConfig, DiagnosticLogger, Severity};
//!
//! let path = std::env::temp_dir().join("ipmilog_doc_example.log");
//! let logger = DiagnosticLogger::new(
//!     DiagConfig::default()
//!         .with_threshold(Severity::DEBUG)
//!         .with_log_file(&path),
//! );
//! logger.buffer_log(Severity::DEBUG, file!(), line!(), b"OK", Some(format_args!(" reply")));
//! let content = std::fs::read_to_string(&path).unwrap();
//! assert!(content.contains("size[0x2:2] reply\n0x00000000 0x4f 0x4b"));
//! assert!(content.ends_with("    OK\n"));
//! ```

mod bridge;
mod diagnostic;
mod macros;
mod session;

use std::{
    fmt, io,
    sync::{Mutex, MutexGuard, PoisonError},
};

use ipmilog_core::{format_located, format_with_error};

pub use bridge::{DiagnosticBridge, init_log_bridge};
pub use diagnostic::DiagnosticLogger;
pub use ipmilog_core::{
    DiagConfig, HexDump, LOG_MSG_LENGTH, LOG_NAME_DEFAULT, LogCapture, LogFile, LogStderr,
    LogWriter, Severity, describe_os_error,
};
pub use session::SessionLogger;

/// Process-wide session logger.
static SESSION: Mutex<SessionLogger> = Mutex::new(SessionLogger::new());

/// Process-wide diagnostic logger, configured from the environment on first use.
static DIAGNOSTIC: DiagnosticLogger = DiagnosticLogger::from_env();

/// Locks the process-wide session logger.
///
/// Do not hold the guard while formatting: a `Display` impl that logs would
/// lock it again. [`session_log`] and [`session_log_os_error`] take care of that.
pub fn session() -> MutexGuard<'static, SessionLogger> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The process-wide diagnostic logger.
pub fn diagnostic() -> &'static DiagnosticLogger {
    &DIAGNOSTIC
}

/// Initializes the process-wide session logger. Does nothing if it is already initialized.
pub fn log_init(name: Option<&str>, daemon: bool, verbosity: i32) {
    session().init(name, daemon, verbosity);
}

/// Halts the process-wide session logger, closing the syslog connection in daemon mode.
pub fn log_halt() {
    session().halt();
}

pub fn log_level_get() -> Severity {
    session().level()
}

pub fn log_level_set(level: Severity) {
    session().set_level(level);
}

/// Writes `[file:line] message` through the process-wide session logger.
///
/// The lock is released while the message is formatted, so `args` may call
/// back into the session logger.
pub fn session_log(level: Severity, file: &str, line: u32, args: fmt::Arguments<'_>) {
    if !session().enabled(level) {
        return;
    }
    let message = format_located(file, line, args);
    session().write(level, message.as_str());
}

/// Writes `message: <description of error>` through the process-wide session logger.
pub fn session_log_os_error(level: Severity, error: &io::Error, args: fmt::Arguments<'_>) {
    if !session().enabled(level) {
        return;
    }
    let message = format_with_error(args, error);
    session().write(level, &message);
}

/// Builder for configuring and initializing the session logger.
#[derive(Default)]
pub struct SessionConfig {
    name: Option<String>,
    daemon: bool,
    verbosity: i32,
    writer: Option<Box<dyn LogWriter + Send>>,
}

impl SessionConfig {
    /// Sets the name shown in syslog.
    pub fn with_name(self, name: &str) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }
    /// Maybe sets the name shown in syslog.
    pub fn maybe_with_name(self, name: Option<&str>) -> Self {
        Self {
            name: name.map(String::from),
            ..self
        }
    }
    /// Route records to syslog instead of stderr.
    pub fn with_daemon(self, daemon: bool) -> Self {
        Self { daemon, ..self }
    }
    /// Each verbosity step lets one more severity level through, starting from NOTICE.
    pub fn with_verbosity(self, verbosity: i32) -> Self {
        Self { verbosity, ..self }
    }
    /// Route records to a custom writer, overriding stderr and syslog.
    pub fn with_writer<W: LogWriter + Send + 'static>(self, writer: W) -> Self {
        Self {
            writer: Some(Box::new(writer)),
            ..self
        }
    }
    /// Initialize the process-wide session logger.
    /// Returns a guard that halts it when dropped, or `None` if the logger was
    /// already initialized, in which case nothing changes.
    #[must_use = "SessionGuard halts the session logger when dropped. Do \"let _guard = session_config().init_global();\""]
    pub fn init_global(self) -> Option<SessionGuard> {
        session()
            .init_with(self)
            .then(|| SessionGuard { _private: () })
    }
}

/// Returns a default SessionConfig for configuring the session logger.
pub fn session_config() -> SessionConfig {
    SessionConfig::default()
}

/// Guard that halts the process-wide session logger when dropped.
#[derive(Debug)]
pub struct SessionGuard {
    _private: (),
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        log_halt();
    }
}
