//! Application error types with rich context

use thiserror::Error;

use crate::types::Platform;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // External Tool Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to spawn `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },

    #[error("{output}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Configuration / State Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("State store error: {message}")]
    Store { message: String },

    // ─────────────────────────────────────────────────────────────
    // Action Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid application id: {value}")]
    InvalidIdentifier { value: String },

    #[error("Cannot choose target device to run command on")]
    NoDevice,

    #[error("'{operation}' is not available for {platform}")]
    Unsupported {
        operation: String,
        platform: Platform,
    },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn command_spawn(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// A command that ran but exited unsuccessfully.
    ///
    /// `output` is the raw text shown to the user; falls back to the exit code
    /// when the tool printed nothing.
    pub fn command_failed(command: impl Into<String>, code: Option<i32>, output: &str) -> Self {
        let output = output.trim();
        let output = if output.is_empty() {
            match code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            output.to_string()
        };
        Self::CommandFailed {
            command: command.into(),
            code,
            output,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
        }
    }

    pub fn unsupported(operation: impl Into<String>, platform: Platform) -> Self {
        Self::Unsupported {
            operation: operation.into(),
            platform,
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors end the current action but the user can re-run it
    /// after fixing their environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CommandSpawn { .. }
                | Error::CommandFailed { .. }
                | Error::InvalidIdentifier { .. }
                | Error::NoDevice
        )
    }

    /// Check if this error should abort the process
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Unsupported { .. } | Error::Terminal { .. } | Error::Store { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_uses_raw_output() {
        let err = Error::command_failed(
            "adb -s emulator-5554 uninstall com.acme",
            Some(1),
            "Failure [DELETE_FAILED_INTERNAL_ERROR]\n",
        );
        assert_eq!(err.to_string(), "Failure [DELETE_FAILED_INTERNAL_ERROR]");
    }

    #[test]
    fn test_command_failed_without_output_reports_status() {
        let err = Error::command_failed("adb start-server", Some(255), "  ");
        assert_eq!(err.to_string(), "exited with status 255");

        let err = Error::command_failed("adb start-server", None, "");
        assert_eq!(err.to_string(), "terminated by signal");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_unsupported_error() {
        let err = Error::unsupported("clear-data", Platform::Ios);
        assert!(err.to_string().contains("clear-data"));
        assert!(err.to_string().contains("iOS"));
        assert!(err.is_fatal());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::NoDevice.is_recoverable());
        assert!(Error::invalid_identifier("1com").is_recoverable());
        assert!(Error::command_failed("adb devices", Some(1), "boom").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::store("locked").is_fatal());
        assert!(!Error::NoDevice.is_fatal());
    }

    #[test]
    fn test_context_keeps_error() {
        let result: Result<()> = Err(Error::NoDevice);
        let err = result.context("Selecting device").unwrap_err();
        assert!(matches!(err, Error::NoDevice));
    }

    #[test]
    fn test_error_constructors() {
        let _ = Error::terminal("test");
        let _ = Error::command_spawn("adb devices", "No such file or directory");
        let _ = Error::store("test");
    }
}
