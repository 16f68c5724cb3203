//! System log destination for daemon mode, on top of POSIX `openlog`/`syslog`/`closelog`.
//!
//! POSIX allows a single syslog connection per process, so at most one
//! [`SyslogWriter`] should be alive at a time.

use std::ffi::CString;

use crate::{log_writer::LogWriter, message::LOG_NAME_DEFAULT, severity::Severity};

/// Open syslog connection. Dropping it calls `closelog`.
#[derive(Debug)]
pub struct SyslogWriter {
    // syslog keeps the ident pointer until closelog, so the string lives here
    ident: CString,
}

impl SyslogWriter {
    /// Registers `name` with syslog under the `LOG_LOCAL4` facility.
    ///
    /// A name with an interior NUL byte cannot be passed to syslog; a warning
    /// goes to stderr and [`LOG_NAME_DEFAULT`] is registered instead.
    pub fn open(name: &str) -> Self {
        let ident = CString::new(name).unwrap_or_else(|_| {
            eprintln!("ipmilog: invalid syslog ident {name:?}, using {LOG_NAME_DEFAULT}");
            CString::new(LOG_NAME_DEFAULT).unwrap_or_default()
        });
        // SAFETY: ident is a valid C string owned by self and outlives the
        // connection, which closelog ends in Drop.
        unsafe {
            libc::openlog(ident.as_ptr(), libc::LOG_CONS, libc::LOG_LOCAL4);
        }
        Self { ident }
    }

    pub fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or(LOG_NAME_DEFAULT)
    }
}

impl LogWriter for SyslogWriter {
    fn regular(&mut self, severity: Severity, line: &str) {
        // lines with interior NULs are cut at the first one
        let line = line.split('\0').next().unwrap_or_default();
        let Ok(message) = CString::new(line) else {
            return;
        };
        let priority = severity.value().clamp(Severity::EMERG.value(), Severity::DEBUG.value());
        // SAFETY: "%s" keeps the message from being read as a format string,
        // both pointers are valid C strings for the duration of the call.
        unsafe {
            libc::syslog(priority, c"%s".as_ptr(), message.as_ptr());
        }
    }

    fn flush(&mut self) {}
}

impl Drop for SyslogWriter {
    fn drop(&mut self) {
        // SAFETY: openlog was called in SyslogWriter::open.
        unsafe {
            libc::closelog();
        }
    }
}
