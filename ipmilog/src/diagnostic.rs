use std::{
    fmt,
    sync::{Mutex, OnceLock, PoisonError},
};

use ipmilog_core::{DiagConfig, HexDump, LogFile, LogStderr, LogWriter, Severity};

enum Source {
    Env,
    Config(DiagConfig),
}

struct DiagState {
    threshold: Severity,
    color: bool,
    writer: Mutex<Box<dyn LogWriter + Send>>,
}

impl DiagState {
    fn open(config: DiagConfig) -> Self {
        let writer: Box<dyn LogWriter + Send> = match config.log_file.map(LogFile::new) {
            Some(Ok(file)) => Box::new(file),
            _ => Box::new(LogStderr),
        };
        Self {
            threshold: config.threshold,
            color: config.color && writer.is_stderr(),
            writer: Mutex::new(writer),
        }
    }

    fn write(&self, level: Severity, record: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.regular(level, record);
        writer.flush();
    }
}

/// Debug trace logger writing `[file:line]<LABEL> message` records to a file or stderr.
///
/// Settings are resolved once, on first use, and kept for the life of the
/// logger: later changes to the environment or to the log file path have no
/// effect. A record at `level` is written when `threshold >= level`, and every
/// record is flushed as soon as it is written.
pub struct DiagnosticLogger {
    source: Source,
    state: OnceLock<DiagState>,
}

impl DiagnosticLogger {
    /// Logger configured from `IPMI_LOGLEVEL`, `IPMI_LOGFILE` and `IPMI_LOGCOLOR` on first use.
    pub const fn from_env() -> Self {
        Self {
            source: Source::Env,
            state: OnceLock::new(),
        }
    }

    /// Logger configured from `config`. The log file is opened on first use.
    pub const fn new(config: DiagConfig) -> Self {
        Self {
            source: Source::Config(config),
            state: OnceLock::new(),
        }
    }

    /// Logger writing to `writer` with a fixed threshold.
    pub fn with_writer<W: LogWriter + Send + 'static>(threshold: Severity, writer: W) -> Self {
        Self {
            source: Source::Env,
            state: OnceLock::from(DiagState {
                threshold,
                color: false,
                writer: Mutex::new(Box::new(writer)),
            }),
        }
    }

    fn state(&self) -> &DiagState {
        self.state.get_or_init(|| {
            let config = match &self.source {
                Source::Env => DiagConfig::load(),
                Source::Config(config) => config.clone(),
            };
            DiagState::open(config)
        })
    }

    pub fn threshold(&self) -> Severity {
        self.state().threshold
    }

    pub fn is_enabled(&self, level: Severity) -> bool {
        self.threshold().allows(level)
    }

    fn prefix(&self, level: Severity, file: &str, line: u32) -> String {
        if self.state().color {
            format!("[{file}:{line}]<{}> ", level.colored_label())
        } else {
            format!("[{file}:{line}]<{}> ", level.label())
        }
    }

    pub fn log(&self, level: Severity, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        let record = format!("{}{args}", self.prefix(level, file, line));
        self.state().write(level, &record);
    }

    /// Writes the record prefix, the buffer address and size, the optional
    /// message, then a [`HexDump`] of `buffer`.
    pub fn buffer_log(
        &self,
        level: Severity,
        file: &str,
        line: u32,
        buffer: &[u8],
        args: Option<fmt::Arguments<'_>>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        let message = args.map(|args| args.to_string()).unwrap_or_default();
        let record = format!(
            "{}[{:p}] size[0x{:x}:{}]{message}{}",
            self.prefix(level, file, line),
            buffer.as_ptr(),
            buffer.len(),
            buffer.len(),
            HexDump(buffer),
        );
        self.state().write(level, &record);
    }
}

impl Default for DiagnosticLogger {
    fn default() -> Self {
        Self::from_env()
    }
}
