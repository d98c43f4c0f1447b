//! Error type for the configuration and host layers.
//!
//! The simulation itself never fails; only loading and validating a
//! [`DashboardConfig`](crate::config::DashboardConfig) can.

use std::fmt;
use std::io;

/// Errors raised while loading or validating dashboard configuration.
#[derive(Debug)]
pub enum Error {
    /// Reading the config file failed.
    Io(io::Error),
    /// The config file is not valid JSON for [`DashboardConfig`](crate::config::DashboardConfig).
    Parse(serde_json::Error),
    /// A field holds a value the simulator cannot run with.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display_names_field() {
        let e = Error::invalid("metrics.bpm", "min 100 exceeds max 60");
        assert_eq!(
            e.to_string(),
            "invalid config field `metrics.bpm`: min 100 exceeds max 60"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        let e: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&e).is_some());
        assert!(e.to_string().starts_with("config I/O error"));
    }
}
