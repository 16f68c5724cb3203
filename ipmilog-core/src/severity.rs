use std::fmt;

use colored::{ColoredString, Colorize};

/// Severity on the eight-level syslog scale. Lower values are more severe.
///
/// Values outside `0..=7` are legal: a session threshold grows past
/// [`Severity::DEBUG`] with verbosity, and a diagnostic threshold is whatever
/// the environment says.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(pub i32);

impl Severity {
    /// System is unusable.
    pub const EMERG: Severity = Severity(0);
    /// Action must be taken immediately.
    pub const ALERT: Severity = Severity(1);
    /// Critical conditions.
    pub const CRIT: Severity = Severity(2);
    /// Error conditions.
    pub const ERR: Severity = Severity(3);
    /// Warning conditions.
    pub const WARNING: Severity = Severity(4);
    /// Normal but significant condition.
    pub const NOTICE: Severity = Severity(5);
    /// Informational messages.
    pub const INFO: Severity = Severity(6);
    /// Debug-level messages.
    pub const DEBUG: Severity = Severity(7);

    /// Alias for [`Severity::ERR`].
    pub const ERROR: Severity = Severity::ERR;
    /// Alias for [`Severity::WARNING`].
    pub const WARN: Severity = Severity::WARNING;

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether a record at `level` passes a threshold of `self`.
    pub fn allows(self, level: Severity) -> bool {
        level <= self
    }

    /// Raises the threshold by `verbosity` steps, saturating at the `i32` bounds.
    pub fn raised(self, verbosity: i32) -> Severity {
        Severity(self.0.saturating_add(verbosity))
    }

    /// Short label used in diagnostic records.
    pub fn label(self) -> &'static str {
        if self <= Severity::EMERG {
            "EMERGENCY"
        } else if self <= Severity::ERR {
            "ERROR"
        } else if self <= Severity::WARNING {
            "WARN"
        } else if self <= Severity::INFO {
            "INFO"
        } else {
            "DEBUG"
        }
    }

    /// Label with a terminal colour per severity band.
    pub fn colored_label(self) -> ColoredString {
        let label = self.label();
        if self <= Severity::EMERG {
            label.purple()
        } else if self <= Severity::ERR {
            label.red()
        } else if self <= Severity::WARNING {
            label.yellow()
        } else if self <= Severity::INFO {
            label.green()
        } else {
            label.blue()
        }
    }
}

impl From<i32> for Severity {
    fn from(value: i32) -> Self {
        Severity(value)
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::ERR,
            log::Level::Warn => Severity::WARNING,
            log::Level::Info => Severity::INFO,
            log::Level::Debug => Severity::DEBUG,
            log::Level::Trace => Severity::DEBUG.raised(1),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
