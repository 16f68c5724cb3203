//! # ipmilog-core
//! Core utilities for ipmilog - severity scale, bounded formatting, writers and hex dumps.

mod config;
mod hexdump;
mod log_writer;
mod message;
mod severity;
#[cfg(unix)]
mod syslog;

pub use config::{DiagConfig, DiagEnv, LOG_COLOR_ENV, LOG_FILE_ENV, LOG_LEVEL_ENV, parse_level};
pub use hexdump::{BYTES_PER_ROW, HexDump, gutter_char};
pub use log_writer::{LogCapture, LogFile, LogStderr, LogWriter};
pub use message::{
    LOG_MSG_LENGTH, LOG_NAME_DEFAULT, MessageBuffer, describe_os_error, format_located,
    format_with_error,
};
pub use severity::Severity;
#[cfg(unix)]
pub use syslog::SyslogWriter;
