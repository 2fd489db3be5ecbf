//! Error and warning types for the translators
//!
//! Errors abort a translation with no partial output. Warnings describe
//! fields that could not be represented; they never change what is returned.

use thiserror::Error;

/// Translator error
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Port resolution failed: {0}")]
    PortResolution(#[from] PortResolutionError),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Settings(#[from] serde_yaml::Error),
}

/// Cross-resource invariant violations detected before any output is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("namespace of Service is '{service}' and namespace of Route is '{route}'; they need to match")]
    NamespaceMismatch { route: String, service: String },

    #[error("Route targets Service '{expected}' but Service '{found}' was supplied")]
    ServiceNameMismatch { expected: String, found: String },

    #[error("Route target kind is '{kind}'; only Service is supported")]
    UnsupportedTargetKind { kind: String },

    #[error("Service '{service}' exposes no ports")]
    NoServicePorts { service: String },

    #[error("{kind} is missing required field {field}")]
    MissingField { kind: String, field: String },
}

/// A port reference that matched none of the candidate Service ports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot match port {requested} against [{}]", .candidates.join(", "))]
pub struct PortResolutionError {
    /// The reference as written on the source resource
    pub requested: String,
    /// Every port the resolver considered, in Service order
    pub candidates: Vec<String>,
}

// =============================================================================
// WARNING SYSTEM
// =============================================================================

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningSeverity {
    /// Informational - a default was applied
    Info,
    /// Warning - translated, but the result differs from the source behavior
    Warning,
    /// Unsupported - the field has no counterpart and was dropped
    Unsupported,
}

impl WarningSeverity {
    /// Get the emoji icon for this severity
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Unsupported => "✗",
        }
    }

    /// Get the label for this severity
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Unsupported => "unsupported",
        }
    }
}

/// A diagnostic raised while translating one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub severity: WarningSeverity,
    /// Source kind, e.g. `Route`
    pub kind: String,
    /// Name of the source resource
    pub resource: String,
    /// Field path on the source, e.g. `Spec.AlternateBackends`
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    fn new(severity: WarningSeverity, kind: &str, resource: &str, field: &str, message: String) -> Self {
        Self {
            severity,
            kind: kind.to_string(),
            resource: resource.to_string(),
            field: field.to_string(),
            message,
            suggestion: None,
        }
    }

    /// Create an info-level warning
    pub fn info(kind: &str, resource: &str, field: &str, message: &str) -> Self {
        Self::new(WarningSeverity::Info, kind, resource, field, message.to_string())
    }

    /// Create a warning-level warning
    pub fn warning(kind: &str, resource: &str, field: &str, message: &str) -> Self {
        Self::new(WarningSeverity::Warning, kind, resource, field, message.to_string())
    }

    /// Create an unsupported field warning
    pub fn unsupported(kind: &str, resource: &str, field: &str) -> Self {
        Self::new(
            WarningSeverity::Unsupported,
            kind,
            resource,
            field,
            format!("{}.{} is unsupported", kind, field),
        )
    }

    /// Add suggestion to warning
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }
}

impl std::fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: [severity] Kind/name - message
        write!(f, "[{}] {}/{}", self.severity.label(), self.kind, self.resource)?;
        write!(f, " - {}", self.message)?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  {} {}", self.severity.icon(), suggestion)?;
        }

        Ok(())
    }
}

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, ConvertError>;
