//! # Holded Export
//!
//! Turns the billing platform's customer, invoice and transaction exports
//! into the accounting platform's invoice import CSV.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: amounts use `rust_decimal`, never floats
//! - **One policy per run**: failing invoices either abort the run or are
//!   skipped with a diagnostic
//! - **No hidden output**: diagnostics are returned with the rows
//! - **Deterministic output**: rows follow the invoice file order
//!
//! ## Example
//!
//! ```no_run
//! use holded_export::{ExportConfig, ExportEngine, MappingSettings};
//!
//! let config = ExportConfig::default();
//! let mut engine = ExportEngine::new(MappingSettings::default());
//! engine.load_files(&config).unwrap();
//! let report = engine.map_invoices().unwrap();
//! engine.write_output(&report, std::io::stdout()).unwrap();
//! ```

pub mod amount;
pub mod classify;
pub mod config;
pub mod date;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod index;
pub mod mapper;
pub mod output;
pub mod records;

pub use amount::Amount;
pub use classify::{ContactDetails, Counterparty, TaxCode};
pub use config::{ErrorPolicy, ExportConfig, MappingSettings};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use engine::{ExportEngine, ExportReport};
pub use error::{ExportError, Result, RowError};
pub use index::JoinIndex;
pub use mapper::map_invoice;
pub use output::OutputRow;
pub use records::{CustomerRecord, InvoiceRecord, InvoiceStatus, TransactionRecord};
