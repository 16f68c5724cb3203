/// Logs to the session logger with the call site's file and line.
///
/// ```
/// ipmilog::lprintf!(ipmilog::Severity::ERR, "Invalid channel {}", 16);
/// ```
#[macro_export]
macro_rules! lprintf {
    ($level:expr, $($arg:tt)+) => {
        $crate::session_log(
            $crate::Severity::from($level),
            file!(),
            line!(),
            format_args!($($arg)+),
        )
    };
}

/// Logs to the session logger, followed by the description of the last OS error.
///
/// The OS error is read before anything else runs.
#[macro_export]
macro_rules! lperror {
    ($level:expr, $($arg:tt)+) => {{
        let error = ::std::io::Error::last_os_error();
        $crate::session_log_os_error(
            $crate::Severity::from($level),
            &error,
            format_args!($($arg)+),
        )
    }};
}

/// Logs to the diagnostic logger with the call site's file and line.
#[macro_export]
macro_rules! ipmi_log {
    ($level:expr, $($arg:tt)+) => {
        $crate::diagnostic().log(
            $crate::Severity::from($level),
            file!(),
            line!(),
            format_args!($($arg)+),
        )
    };
}

/// Dumps a byte buffer to the diagnostic logger, with an optional message.
#[macro_export]
macro_rules! ipmi_buffer_log {
    ($level:expr, $buf:expr $(,)?) => {
        $crate::diagnostic().buffer_log(
            $crate::Severity::from($level),
            file!(),
            line!(),
            &$buf[..],
            None,
        )
    };
    ($level:expr, $buf:expr, $($arg:tt)+) => {
        $crate::diagnostic().buffer_log(
            $crate::Severity::from($level),
            file!(),
            line!(),
            &$buf[..],
            Some(format_args!($($arg)+)),
        )
    };
}

#[macro_export]
macro_rules! ipmi_debug {
    ($($arg:tt)+) => { $crate::ipmi_log!($crate::Severity::DEBUG, $($arg)+) };
}

#[macro_export]
macro_rules! ipmi_info {
    ($($arg:tt)+) => { $crate::ipmi_log!($crate::Severity::INFO, $($arg)+) };
}

#[macro_export]
macro_rules! ipmi_err {
    ($($arg:tt)+) => { $crate::ipmi_log!($crate::Severity::ERR, $($arg)+) };
}

#[macro_export]
macro_rules! ipmi_emerg {
    ($($arg:tt)+) => { $crate::ipmi_log!($crate::Severity::EMERG, $($arg)+) };
}

#[macro_export]
macro_rules! ipmi_buffer_debug {
    ($($arg:tt)+) => { $crate::ipmi_buffer_log!($crate::Severity::DEBUG, $($arg)+) };
}

#[macro_export]
macro_rules! ipmi_buffer_err {
    ($($arg:tt)+) => { $crate::ipmi_buffer_log!($crate::Severity::ERR, $($arg)+) };
}

#[macro_export]
macro_rules! ipmi_buffer_emerg {
    ($($arg:tt)+) => { $crate::ipmi_buffer_log!($crate::Severity::EMERG, $($arg)+) };
}
