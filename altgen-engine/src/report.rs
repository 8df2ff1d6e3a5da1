//! Diagnostics and batch reports.

use serde::Serialize;

use crate::{BatchPhase, DeclarationId};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A declaration failed to run or to write.
    Error,
    /// Something was skipped.
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from a batch phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: BatchPhase,
    pub message: String,
    /// The declaration or path concerned (e.g. "Foo -> Bar").
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: BatchPhase, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: BatchPhase, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: BatchPhase, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: BatchPhase, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// What happened during one batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Whether the batch bypassed overwrite policies.
    pub forced: bool,
    /// Declarations that were run, in order.
    pub ran: Vec<DeclarationId>,
    /// Output paths written.
    pub written: Vec<String>,
    /// Output paths left alone because they exist and may not be overwritten.
    pub skipped: Vec<String>,
    /// Notified paths absorbed by a pending suppression.
    pub suppressed: Vec<String>,
    /// Source paths reimported to run deferred cascades in a later batch.
    pub deferred: Vec<String>,
    /// Whether cascaded declarations ran in this batch.
    pub cascaded: bool,
    /// Whether the host was asked to refresh its index.
    pub refresh_requested: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    pub(crate) fn new(forced: bool) -> Self {
        Self {
            forced,
            ..Self::default()
        }
    }

    /// Whether any file was written.
    pub fn wrote_any(&self) -> bool {
        !self.written.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::error(BatchPhase::RunningDirect, "emit failed").at("Foo -> Bar");
        assert!(diag.severity.is_error());
        assert_eq!(diag.to_string(), "error: emit failed (at Foo -> Bar)");
    }

    #[test]
    fn test_report_errors() {
        let mut report = BatchReport::default();
        assert!(!report.has_errors());

        report
            .diagnostics
            .push(Diagnostic::warning(BatchPhase::ResolvingTargets, "missing"));
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);

        report
            .diagnostics
            .push(Diagnostic::error(BatchPhase::RunningDirect, "boom"));
        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn test_serialize() {
        let diag = Diagnostic::warning(BatchPhase::RunningCascaded, "skipped");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["phase"], "running_cascaded");
    }
}
