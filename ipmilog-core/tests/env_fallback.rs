//! One non-Unicode variable does not discard the rest of the diagnostic settings.
#![cfg(unix)]

use std::{ffi::OsStr, os::unix::ffi::OsStrExt, path::PathBuf};

use ipmilog_core::{DiagConfig, LOG_COLOR_ENV, LOG_FILE_ENV, LOG_LEVEL_ENV, Severity};

#[test]
fn test_non_unicode_variable_keeps_other_settings() {
    let path = OsStr::from_bytes(b"/tmp/ipmilog-\xff.log");
    // SAFETY: this is the only test in this binary, nothing else reads the environment
    unsafe {
        std::env::set_var(LOG_LEVEL_ENV, "6");
        std::env::set_var(LOG_FILE_ENV, path);
        std::env::set_var(LOG_COLOR_ENV, "on");
    }
    let config = DiagConfig::load();
    assert_eq!(config.threshold, Severity::INFO);
    assert_eq!(config.log_file, Some(PathBuf::from(path)));
    assert!(config.color);

    unsafe {
        std::env::set_var(LOG_FILE_ENV, "");
        std::env::remove_var(LOG_COLOR_ENV);
    }
    let config = DiagConfig::load();
    assert_eq!(config.threshold, Severity::INFO);
    assert_eq!(config.log_file, None);
    assert!(!config.color);
}
