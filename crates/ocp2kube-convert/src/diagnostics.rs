//! Diagnostic sinks
//!
//! Translators report every unsupported or degraded field to a caller
//! supplied sink. Sinks observe; they are never consulted, so the translated
//! output is identical whichever sink is attached.

use crate::error::{ConversionWarning, WarningSeverity};

/// Receiver for conversion warnings
pub trait DiagnosticSink {
    fn emit(&mut self, warning: ConversionWarning);
}

/// Drops every warning
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _warning: ConversionWarning) {}
}

/// Forwards warnings to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, warning: ConversionWarning) {
        match warning.severity {
            WarningSeverity::Info => tracing::info!("{}", warning),
            WarningSeverity::Warning | WarningSeverity::Unsupported => tracing::warn!("{}", warning),
        }
    }
}

/// Keeps warnings in memory for later display
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub warnings: Vec<ConversionWarning>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of warnings by severity
    pub fn count_by_severity(&self, severity: WarningSeverity) -> usize {
        self.warnings.iter().filter(|w| w.severity == severity).count()
    }

    /// Check if there are any unsupported fields
    pub fn has_unsupported(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Unsupported)
    }

    pub fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, warning: ConversionWarning) {
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_counts() {
        let mut sink = CollectingSink::new();
        sink.emit(ConversionWarning::unsupported("Route", "web", "Spec.Weight"));
        sink.emit(ConversionWarning::info("Route", "web", "Spec.Host", "kept original host"));

        assert_eq!(sink.warnings.len(), 2);
        assert_eq!(sink.count_by_severity(WarningSeverity::Unsupported), 1);
        assert!(sink.has_unsupported());
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = NullSink;
        sink.emit(ConversionWarning::warning("Route", "web", "Spec.Tls", "dropped"));
    }
}
