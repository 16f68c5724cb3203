use std::fmt::{self, Write};

/// Name used when the session logger is given none.
pub const LOG_NAME_DEFAULT: &str = "ipmitool";

/// Capacity of the session logger's formatting buffer, terminator slot included.
pub const LOG_MSG_LENGTH: usize = 1024;

/// Fixed-capacity text buffer that truncates instead of overflowing.
///
/// At most `capacity - 1` bytes of text are kept. Writes past that point are
/// dropped at a character boundary and recorded in [`is_truncated`](Self::is_truncated).
#[derive(Debug, Clone)]
pub struct MessageBuffer {
    text: String,
    limit: usize,
    truncated: bool,
}

impl MessageBuffer {
    pub fn new(capacity: usize) -> Self {
        let limit = capacity.saturating_sub(1);
        Self {
            text: String::with_capacity(limit),
            limit,
            truncated: false,
        }
    }

    /// Bytes still available before truncation kicks in.
    pub fn remaining(&self) -> usize {
        self.limit - self.text.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Appends formatted output, keeping whatever fits.
    pub fn append(&mut self, args: fmt::Arguments<'_>) {
        // write_str never fails; truncation is tracked on the buffer
        let _ = self.write_fmt(args);
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new(LOG_MSG_LENGTH)
    }
}

impl Write for MessageBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.remaining();
        if s.len() <= room {
            self.text.push_str(s);
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.text.push_str(&s[..end]);
            self.truncated = true;
        }
        Ok(())
    }
}

/// Session record: `[file:line] message`, bounded to [`LOG_MSG_LENGTH`].
pub fn format_located(file: &str, line: u32, args: fmt::Arguments<'_>) -> MessageBuffer {
    let mut buf = MessageBuffer::default();
    buf.append(format_args!("[{file}:{line}] "));
    buf.append(args);
    buf
}

/// Errno-annotated record: the caller's text, bounded to [`LOG_MSG_LENGTH`],
/// followed by `": "` and the error description.
pub fn format_with_error(args: fmt::Arguments<'_>, error: &std::io::Error) -> String {
    let mut buf = MessageBuffer::default();
    buf.append(args);
    let mut line = buf.into_string();
    line.push_str(": ");
    line.push_str(&describe_os_error(error));
    line
}

/// Platform text for an OS error, without std's ` (os error N)` suffix.
pub fn describe_os_error(error: &std::io::Error) -> String {
    let text = error.to_string();
    match error.raw_os_error() {
        Some(code) => {
            let suffix = format!(" (os error {code})");
            text.strip_suffix(&suffix).map(str::to_owned).unwrap_or(text)
        }
        None => text,
    }
}
