use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use crate::severity::Severity;

/// Destination for formatted log records.
///
/// Writers never report I/O failures: a record that cannot be written is dropped.
pub trait LogWriter {
    /// Writes one record followed by a newline.
    fn regular(&mut self, severity: Severity, line: &str);
    fn flush(&mut self);
    /// Whether the destination is standard error.
    fn is_stderr(&self) -> bool {
        false
    }
}

/// Log file opened for writing, truncated on open.
pub struct LogFile {
    file: BufWriter<File>,
}

impl LogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::options()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }
}

impl LogWriter for LogFile {
    fn regular(&mut self, _: Severity, line: &str) {
        writeln!(self.file, "{line}").ok();
    }

    fn flush(&mut self) {
        self.file.flush().ok();
    }
}

#[derive(Default, Debug)]
pub struct LogStderr;

impl LogWriter for LogStderr {
    fn regular(&mut self, _: Severity, line: &str) {
        writeln!(io::stderr().lock(), "{line}").ok();
    }

    fn flush(&mut self) {
        io::stderr().flush().ok();
    }

    fn is_stderr(&self) -> bool {
        true
    }
}

/// In-memory writer. Clones share the same storage.
#[derive(Default, Debug, Clone)]
pub struct LogCapture {
    lines: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured records without severities.
    pub fn lines(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, line)| line).collect()
    }

    pub fn records(&self) -> Vec<(Severity, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Everything captured so far, one record per line.
    pub fn contents(&self) -> String {
        self.lines()
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogWriter for LogCapture {
    fn regular(&mut self, severity: Severity, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, line.to_owned()));
    }

    fn flush(&mut self) {}
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn regular(&mut self, severity: Severity, line: &str) {
        (**self).regular(severity, line)
    }

    fn flush(&mut self) {
        (**self).flush()
    }

    fn is_stderr(&self) -> bool {
        (**self).is_stderr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ipmilog_test_{name}_{}.log", std::process::id()))
    }

    #[test]
    fn test_log_file_truncates_on_open() {
        let path = test_path("log_file");
        std::fs::write(&path, "stale content\n").unwrap();
        let mut log_file = LogFile::new(&path).unwrap();
        log_file.regular(Severity::INFO, "Hello, world!");
        log_file.regular(Severity::DEBUG, "second");
        log_file.flush();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Hello, world!\nsecond\n"
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_log_file_missing_directory() {
        let path = std::env::temp_dir()
            .join("ipmilog_no_such_dir")
            .join("x.log");
        assert!(LogFile::new(path).is_err());
    }

    #[test]
    fn test_log_capture_shares_storage() {
        let capture = LogCapture::new();
        let mut writer: Box<dyn LogWriter> = Box::new(capture.clone());
        writer.regular(Severity::ERR, "first");
        writer.regular(Severity::DEBUG, "second");
        writer.flush();
        assert!(!writer.is_stderr());
        assert_eq!(capture.contents(), "first\nsecond\n");
        assert_eq!(capture.records()[0].0, Severity::ERR);
        capture.clear();
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn test_log_stderr() {
        let mut log_stderr = LogStderr;
        assert!(log_stderr.is_stderr());
        log_stderr.regular(Severity::INFO, "stderr line");
        log_stderr.flush();
    }
}
