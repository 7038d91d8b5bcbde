//! CLI-specific error types and mappings.
//!
//! Maps library errors to exit codes and user-facing messages.

use thiserror::Error;
use watchtalk_core::{CoreError, SettingsError, SurfaceError};
use watchtalk_voice::VoiceError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (settings file missing, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Platform lacks a required capability.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// An external service failed.
    #[error("Service error: {0}")]
    Service(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,   // EX_USAGE
            Self::Io(_) => 74,         // EX_IOERR
            Self::Config(_) => 78,     // EX_CONFIG
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Service(_) => 70,    // EX_SOFTWARE
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Settings(e) => Self::Config(e.to_string()),
            CoreError::Configuration(msg) => Self::Config(msg),
            CoreError::Answer(e) => Self::Service(e.to_string()),
            CoreError::Surface(e) => Self::Core(e.to_string()),
            CoreError::Speech(e) => Self::Unavailable(e.to_string()),
            CoreError::Readiness(e) => Self::Core(e.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SurfaceError> for CliError {
    fn from(err: SurfaceError) -> Self {
        Self::from(CoreError::from(err))
    }
}

impl From<VoiceError> for CliError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Unsupported => Self::Unavailable(err.to_string()),
            VoiceError::Speech(e) => Self::from(CoreError::from(e)),
            VoiceError::Answer(e) => Self::from(CoreError::from(e)),
            VoiceError::HttpClient(msg) => Self::Config(msg),
            VoiceError::Stopped => Self::Core(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("invalid settings file: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchtalk_core::AnswerError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments(String::new()).exit_code(), 2);
        assert_eq!(CliError::Config(String::new()).exit_code(), 78);
        assert_eq!(CliError::Unavailable(String::new()).exit_code(), 69);
    }

    #[test]
    fn test_settings_error_is_config() {
        let err = CliError::from(SettingsError::EmptyHoldKey);
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_voice_errors() {
        assert_eq!(CliError::from(VoiceError::Unsupported).exit_code(), 69);
        assert_eq!(
            CliError::from(VoiceError::Answer(AnswerError::Timeout)).exit_code(),
            70
        );
    }
}
