//! Error types for the export pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that abort an export run.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to open or read an input file
    #[error("cannot read {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed row in one of the inputs
    #[error("invalid {dataset} record at row {row}: {message}")]
    InvalidRecord {
        dataset: &'static str,
        row: usize,
        message: String,
    },

    /// I/O error while writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row failed under the abort policy
    #[error(transparent)]
    Row(#[from] RowError),
}

/// Why a single invoice could not be mapped.
///
/// Every variant names the invoice by internal id and human-readable number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("transaction not found for invoice {number} ({invoice_id}), amount due {amount_due}, amount paid {amount_paid}")]
    MissingTransaction {
        invoice_id: String,
        number: String,
        amount_due: String,
        amount_paid: String,
    },

    #[error("customer {customer} not found for invoice {number} ({invoice_id})")]
    MissingCustomer {
        invoice_id: String,
        number: String,
        customer: String,
    },

    #[error("invalid {field} {value:?} on invoice {number} ({invoice_id})")]
    InvalidAmount {
        invoice_id: String,
        number: String,
        field: &'static str,
        value: String,
    },

    #[error("invalid {field} {value:?} on invoice {number} ({invoice_id})")]
    InvalidDate {
        invoice_id: String,
        number: String,
        field: &'static str,
        value: String,
    },

    /// Guards decimal overflow in the unit price division only; the divisor
    /// is always 1 or 1.21.
    #[error("cannot calculate unit price for invoice {number} ({invoice_id})")]
    NonFiniteUnitPrice { invoice_id: String, number: String },
}

impl RowError {
    /// Internal id of the offending invoice.
    pub fn invoice_id(&self) -> &str {
        match self {
            RowError::MissingTransaction { invoice_id, .. }
            | RowError::MissingCustomer { invoice_id, .. }
            | RowError::InvalidAmount { invoice_id, .. }
            | RowError::InvalidDate { invoice_id, .. }
            | RowError::NonFiniteUnitPrice { invoice_id, .. } => invoice_id,
        }
    }

    /// Human-readable number of the offending invoice.
    pub fn number(&self) -> &str {
        match self {
            RowError::MissingTransaction { number, .. }
            | RowError::MissingCustomer { number, .. }
            | RowError::InvalidAmount { number, .. }
            | RowError::InvalidDate { number, .. }
            | RowError::NonFiniteUnitPrice { number, .. } => number,
        }
    }
}
