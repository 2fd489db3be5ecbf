//! CLI error types with exit code handling
//!
//! Library errors are mapped onto a small set of variants, each with its own
//! exit code and, where it helps, a hint on how to fix the input.

use miette::Diagnostic;
use ocp2kube_convert::{ConvertError, ValidationError};
use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The source resources cannot be translated together
    #[error("Translation failed: {message}")]
    #[diagnostic(code(ocp2kube::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A source document could not be read as the expected kind
    #[error("Invalid input {path}: {message}")]
    #[diagnostic(code(ocp2kube::cli::input))]
    Input { path: String, message: String },

    /// Settings file or patterns are invalid
    #[error("Configuration error: {message}")]
    #[diagnostic(code(ocp2kube::cli::config))]
    Config { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(ocp2kube::cli::io))]
    Io { message: String },

    /// Rendering the output failed
    #[error("Output error: {message}")]
    #[diagnostic(code(ocp2kube::cli::output))]
    Output { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Output { .. } => exit_codes::ERROR,
        }
    }

    /// Create an input error for a source file
    pub fn input(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Input {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn output(err: impl std::fmt::Display) -> Self {
        Self::Output {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::Validation(e) => {
                let help = match e {
                    ValidationError::NamespaceMismatch { .. }
                    | ValidationError::ServiceNameMismatch { .. }
                    | ValidationError::UnsupportedTargetKind { .. } => {
                        Some("The Route's spec.to must name the Service given, in the same namespace")
                    }
                    ValidationError::NoServicePorts { .. } => Some("Add at least one port to the Service"),
                    ValidationError::MissingField { .. } => None,
                };
                CliError::Validation {
                    message: e.to_string(),
                    help: help.map(str::to_string),
                }
            }
            ConvertError::PortResolution(e) => CliError::Validation {
                message: e.to_string(),
                help: Some(
                    "spec.port.targetPort must name a Service port or equal one of its target ports".to_string(),
                ),
            },
            ConvertError::InvalidPattern { .. } | ConvertError::Settings(_) => CliError::config(err.to_string()),
            ConvertError::Io(e) => CliError::from(e),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
