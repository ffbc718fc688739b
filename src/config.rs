//! Run configuration: where the files live and how row failures are handled.

use clap::ValueEnum;
use std::path::PathBuf;

/// What to do when an invoice cannot be mapped.
///
/// One policy applies to the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ErrorPolicy {
    /// Stop at the first failing invoice; nothing is written.
    #[default]
    Abort,
    /// Leave the invoice out, record a diagnostic and carry on.
    Skip,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub customers_path: PathBuf,
    pub invoices_path: PathBuf,
    pub transactions_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            customers_path: PathBuf::from("input/customers.csv"),
            invoices_path: PathBuf::from("input/invoices.csv"),
            transactions_path: PathBuf::from("input/transactions.csv"),
            output_path: PathBuf::from("output/holded_invoices.csv"),
        }
    }
}

/// Constants stamped on every output row, plus the error policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSettings {
    pub policy: ErrorPolicy,
    pub product_description: String,
    /// Revenue account the sale is booked to.
    pub sales_account: String,
    /// Treasury account the collection is booked to.
    pub charge_account: String,
}

impl Default for MappingSettings {
    fn default() -> Self {
        MappingSettings {
            policy: ErrorPolicy::Abort,
            product_description: "Premium Plan - Planning Poker Online".to_string(),
            sales_account: "70500000".to_string(),
            charge_account: "57200001".to_string(),
        }
    }
}
