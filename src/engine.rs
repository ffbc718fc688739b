//! The export pipeline: load, index, map, hand back rows and diagnostics.
//!
//! Everything is read into memory first. Mapping is a single sequential pass
//! over the invoices in input order, so the output order is the invoice
//! file's order.

use crate::config::{ErrorPolicy, ExportConfig, MappingSettings};
use crate::diagnostics::Diagnostics;
use crate::error::{ExportError, Result};
use crate::index::JoinIndex;
use crate::mapper::map_invoice;
use crate::output::{write_rows, OutputRow};
use crate::records::{load_file, read_records, CustomerRecord, InvoiceRecord, TransactionRecord};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};

/// Result of a mapping pass.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Mapped rows, in invoice input order.
    pub rows: Vec<OutputRow>,

    pub diagnostics: Diagnostics,

    /// Invoices left out because they had no number (drafts and voids).
    pub unnumbered: usize,
}

/// The invoice export engine.
///
/// Holds the three loaded datasets. Mapping borrows them read-only, so the
/// engine can be mapped more than once with the same outcome.
pub struct ExportEngine {
    settings: MappingSettings,
    customers: Vec<CustomerRecord>,
    invoices: Vec<InvoiceRecord>,
    transactions: Vec<TransactionRecord>,
}

impl ExportEngine {
    /// Creates an engine with no data loaded.
    pub fn new(settings: MappingSettings) -> Self {
        ExportEngine {
            settings,
            customers: Vec::new(),
            invoices: Vec::new(),
            transactions: Vec::new(),
        }
    }

    pub fn load_customers<R: Read>(&mut self, reader: R) -> Result<()> {
        self.customers = read_records(reader, "customer")?;
        Ok(())
    }

    pub fn load_invoices<R: Read>(&mut self, reader: R) -> Result<()> {
        self.invoices = read_records(reader, "invoice")?;
        Ok(())
    }

    pub fn load_transactions<R: Read>(&mut self, reader: R) -> Result<()> {
        self.transactions = read_records(reader, "transaction")?;
        Ok(())
    }

    /// Loads all three inputs from the configured paths.
    pub fn load_files(&mut self, config: &ExportConfig) -> Result<()> {
        self.customers = load_file(&config.customers_path, "customer")?;
        self.invoices = load_file(&config.invoices_path, "invoice")?;
        self.transactions = load_file(&config.transactions_path, "transaction")?;

        info!(
            "Loaded {} customers, {} invoices, {} transactions",
            self.customers.len(),
            self.invoices.len(),
            self.transactions.len()
        );
        Ok(())
    }

    /// Maps every billable invoice.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failing invoice ends the pass
    /// with [`ExportError::Row`]. Under [`ErrorPolicy::Skip`] it is recorded
    /// in the report's diagnostics and left out.
    pub fn map_invoices(&self) -> Result<ExportReport> {
        let mut report = ExportReport::default();
        let index = JoinIndex::build(&self.customers, &self.transactions, &mut report.diagnostics);

        for invoice in &self.invoices {
            if !invoice.is_billable() {
                debug!("Ignoring invoice {} without number", invoice.id);
                report.unnumbered += 1;
                continue;
            }

            match map_invoice(invoice, &index, &self.settings) {
                Ok(row) => report.rows.push(row),
                Err(e) => match self.settings.policy {
                    ErrorPolicy::Abort => return Err(ExportError::Row(e)),
                    ErrorPolicy::Skip => {
                        debug!("Skipping invoice {} ({}): {}", invoice.number, invoice.id, e);
                        report.diagnostics.skip(&e);
                    }
                },
            }
        }

        info!(
            "Mapped {} invoices ({} skipped, {} without number)",
            report.rows.len(),
            report.diagnostics.skipped().count(),
            report.unnumbered
        );
        Ok(report)
    }

    /// Writes mapped rows as CSV.
    pub fn write_output<W: Write>(&self, report: &ExportReport, writer: W) -> Result<()> {
        write_rows(&report.rows, writer)
    }

    /// Writes mapped rows to `config.output_path`, creating its directory.
    pub fn write_file(&self, report: &ExportReport, config: &ExportConfig) -> Result<()> {
        if let Some(parent) = config.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&config.output_path)?;
        self.write_output(report, BufWriter::new(file))?;
        info!("Exported {} rows to {}", report.rows.len(), config.output_path.display());
        Ok(())
    }
}

impl Default for ExportEngine {
    fn default() -> Self {
        Self::new(MappingSettings::default())
    }
}
