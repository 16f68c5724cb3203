use std::{env, path::PathBuf};

use derive_from_env::FromEnv;

use crate::severity::Severity;

/// Environment variable holding the diagnostic threshold.
pub const LOG_LEVEL_ENV: &str = "IPMI_LOGLEVEL";
/// Environment variable holding the diagnostic log file path.
pub const LOG_FILE_ENV: &str = "IPMI_LOGFILE";
/// Environment variable enabling coloured labels on stderr.
pub const LOG_COLOR_ENV: &str = "IPMI_LOGCOLOR";

/// Raw diagnostic logger settings as found in the environment.
#[derive(FromEnv, Debug, Clone, Default, PartialEq, Eq)]
#[from_env(prefix = "IPMI")]
#[allow(non_snake_case)]
pub struct DiagEnv {
    pub LOGLEVEL: Option<String>,
    pub LOGFILE: Option<String>,
    pub LOGCOLOR: Option<String>,
}

/// Diagnostic logger settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagConfig {
    pub threshold: Severity,
    pub log_file: Option<PathBuf>,
    pub color: bool,
}

impl DiagConfig {
    /// Reads `IPMI_LOGLEVEL`, `IPMI_LOGFILE` and `IPMI_LOGCOLOR`.
    /// Unset variables yield the defaults: threshold 0, stderr, no colour.
    ///
    /// A variable that is not valid Unicode does not discard the others. A
    /// non-Unicode log file path is used as is; a level or flag is read lossily.
    pub fn load() -> Self {
        match DiagEnv::from_env() {
            Ok(env) => {
                let config = Self::from(env);
                Self {
                    log_file: config.log_file.or_else(os_log_file),
                    ..config
                }
            }
            Err(_) => Self::load_each(),
        }
    }

    fn load_each() -> Self {
        let lossy = |name: &str| env::var_os(name).map(|value| value.to_string_lossy().into_owned());
        Self {
            threshold: Severity(lossy(LOG_LEVEL_ENV).as_deref().map(parse_level).unwrap_or(0)),
            log_file: os_log_file(),
            color: lossy(LOG_COLOR_ENV).as_deref().is_some_and(parse_flag),
        }
    }

    pub fn with_threshold(self, threshold: Severity) -> Self {
        Self { threshold, ..self }
    }

    pub fn with_log_file<P: Into<PathBuf>>(self, path: P) -> Self {
        Self {
            log_file: Some(path.into()),
            ..self
        }
    }

    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }
}

impl From<DiagEnv> for DiagConfig {
    fn from(env: DiagEnv) -> Self {
        Self {
            threshold: Severity(env.LOGLEVEL.as_deref().map(parse_level).unwrap_or(0)),
            log_file: env.LOGFILE.filter(|path| !path.is_empty()).map(PathBuf::from),
            color: env.LOGCOLOR.as_deref().is_some_and(parse_flag),
        }
    }
}

/// Integer prefix of `text` the way C `atoi` reads it, saturating on overflow.
pub fn parse_level(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(digit - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn os_log_file() -> Option<PathBuf> {
    env::var_os(LOG_FILE_ENV)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
