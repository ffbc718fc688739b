//! Diagnostics collected during a mapping pass.
//!
//! The pipeline never prints. Anything worth telling the operator about a
//! row lands here and is handed back with the mapped rows, so the caller
//! decides whether to log it, store it or assert on it.

use crate::error::RowError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Data was ambiguous but a row could still be produced.
    Warning,
    /// The invoice was left out of the export.
    Skipped,
}

/// One diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Invoice id, or customer id for customer-level warnings.
    pub subject: String,

    /// Invoice number, when the diagnostic concerns a numbered invoice.
    pub number: Option<String>,

    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Skipped => "skipped",
        };
        match &self.number {
            Some(number) => write!(f, "{} [{} {}]: {}", label, number, self.subject, self.message),
            None => write!(f, "{} [{}]: {}", label, self.subject, self.message),
        }
    }
}

/// Ordered collector of diagnostics for one run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning about `subject`.
    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            subject: subject.into(),
            number: None,
            message: message.into(),
        });
    }

    /// Records that an invoice was left out because of `error`.
    pub fn skip(&mut self, error: &RowError) {
        self.entries.push(Diagnostic {
            severity: Severity::Skipped,
            subject: error.invoice_id().to_string(),
            number: Some(error.number().to_string()),
            message: error.to_string(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Skipped)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_carries_invoice_identity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.skip(&RowError::NonFiniteUnitPrice {
            invoice_id: "in_9".to_string(),
            number: "INV-9".to_string(),
        });

        let entry = &diagnostics.entries()[0];
        assert_eq!(entry.severity, Severity::Skipped);
        assert_eq!(entry.subject, "in_9");
        assert_eq!(entry.number.as_deref(), Some("INV-9"));
        assert_eq!(
            entry.to_string(),
            "skipped [INV-9 in_9]: cannot calculate unit price for invoice INV-9 (in_9)"
        );
    }

    #[test]
    fn test_filters_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("cus_1", "duplicate");
        diagnostics.skip(&RowError::MissingCustomer {
            invoice_id: "in_1".to_string(),
            number: "INV-1".to_string(),
            customer: "cus_2".to_string(),
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(diagnostics.skipped().count(), 1);
        assert_eq!(diagnostics.entries()[0].to_string(), "warning [cus_1]: duplicate");
    }
}
