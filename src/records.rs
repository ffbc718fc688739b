//! Input record models and the CSV loader.
//!
//! Column names follow the billing platform's export headers. Columns the
//! mapping does not use are ignored; optional columns default to empty.

use crate::error::{ExportError, Result};
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A customer as exported by the billing platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerRecord {
    pub id: String,

    /// Tax identifier, e.g. `ESB12345678` or `DE123456789`. Often blank.
    #[serde(rename = "Business Vat ID", default)]
    pub vat_id: String,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Address Country", default)]
    pub country: String,
}

impl CustomerRecord {
    /// The tax id, if the customer has one.
    pub fn tax_id(&self) -> Option<&str> {
        non_blank(&self.vat_id)
    }
}

/// Invoice status. Only `paid` matters for the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum InvoiceStatus {
    Paid,
    Other(String),
}

impl From<String> for InvoiceStatus {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("paid") {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Other(value)
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Other(String::new())
    }
}

/// An invoice with the customer address snapshot taken when it was issued.
///
/// Amounts stay as text until mapping so a malformed amount fails only its
/// own row, with the invoice named in the error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,

    /// Human-readable number. Blank for drafts and voided invoices.
    #[serde(rename = "Number", default)]
    pub number: String,

    #[serde(rename = "Status", default)]
    pub status: InvoiceStatus,

    #[serde(rename = "Amount Due", default)]
    pub amount_due: String,

    #[serde(rename = "Amount Paid", default)]
    pub amount_paid: String,

    #[serde(rename = "Tax", default)]
    pub tax: String,

    #[serde(rename = "Total", default)]
    pub total: String,

    /// Customer id this invoice was billed to.
    #[serde(rename = "Customer", default)]
    pub customer: String,

    #[serde(rename = "Customer Name", default)]
    pub customer_name: String,

    #[serde(rename = "Customer Address Line1", default)]
    pub address_line1: String,

    #[serde(rename = "Customer Address Line2", default)]
    pub address_line2: String,

    #[serde(rename = "Customer Address City", default)]
    pub address_city: String,

    #[serde(rename = "Customer Address State", default)]
    pub address_state: String,

    #[serde(rename = "Customer Address Zip", default)]
    pub address_zip: String,

    #[serde(rename = "Customer Address Country", default)]
    pub address_country: String,

    #[serde(rename = "Subscription", default)]
    pub subscription: String,

    #[serde(rename = "Date (UTC)", default)]
    pub date: String,
}

impl InvoiceRecord {
    /// Invoices without a number are drafts or voids and never exported.
    pub fn is_billable(&self) -> bool {
        !self.number.trim().is_empty()
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}

/// A balance transaction settling an invoice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRecord {
    pub invoice_id: String,

    /// Collected amount, tax inclusive.
    #[serde(default)]
    pub gross: String,

    /// Date the funds became available.
    #[serde(default)]
    pub available_on: String,
}

pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Reads every record of one dataset from a CSV reader.
///
/// A row that does not deserialize aborts the load: a half-read input would
/// silently drop invoices from the export.
pub fn read_records<T, R>(reader: R, dataset: &'static str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<T>().enumerate() {
        let row = row_idx + 2; // 1-indexed, accounting for header row
        let record = result.map_err(|e| ExportError::InvalidRecord {
            dataset,
            row,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    debug!("Loaded {} {} records", records.len(), dataset);
    Ok(records)
}

/// Opens `path` and reads every record of one dataset.
pub fn load_file<T: DeserializeOwned>(path: &Path, dataset: &'static str) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|source| ExportError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(BufReader::new(file), dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_invoices_by_header_name() {
        let csv = "id,Number,Status,Amount Due,Amount Paid,Tax,Total,Customer,Customer Address Country,Date (UTC),Extra\n\
                   in_1,INV-1,paid,\"10,00\",\"10,00\",\"2,10\",\"10,00\",cus_1,ES,2021-03-01 10:15,ignored\n";

        let invoices: Vec<InvoiceRecord> = read_records(Cursor::new(csv), "invoice").unwrap();
        assert_eq!(invoices.len(), 1);

        let invoice = &invoices[0];
        assert_eq!(invoice.id, "in_1");
        assert_eq!(invoice.number, "INV-1");
        assert!(invoice.is_paid());
        assert_eq!(invoice.amount_due, "10,00");
        assert_eq!(invoice.tax, "2,10");
        assert_eq!(invoice.customer, "cus_1");
        assert_eq!(invoice.address_country, "ES");
        assert_eq!(invoice.subscription, "");
    }

    #[test]
    fn test_status_other_than_paid() {
        assert_eq!(InvoiceStatus::from("Paid".to_string()), InvoiceStatus::Paid);
        assert_eq!(
            InvoiceStatus::from("open".to_string()),
            InvoiceStatus::Other("open".to_string())
        );
    }

    #[test]
    fn test_blank_number_is_not_billable() {
        let invoice = InvoiceRecord {
            number: "  ".to_string(),
            ..Default::default()
        };
        assert!(!invoice.is_billable());
    }

    #[test]
    fn test_read_customers_trims_whitespace() {
        let csv = "id, Business Vat ID\ncus_1 , ESB12345678 \ncus_2,\n";
        let customers: Vec<CustomerRecord> = read_records(Cursor::new(csv), "customer").unwrap();

        assert_eq!(customers[0].id, "cus_1");
        assert_eq!(customers[0].tax_id(), Some("ESB12345678"));
        assert_eq!(customers[1].tax_id(), None);
    }

    #[test]
    fn test_missing_required_column_reports_row() {
        let csv = "gross,available_on\n\"9,50\",2021-03-03\n";
        let err = read_records::<TransactionRecord, _>(Cursor::new(csv), "transaction").unwrap_err();

        match err {
            ExportError::InvalidRecord { dataset, row, .. } => {
                assert_eq!(dataset, "transaction");
                assert_eq!(row, 2);
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file::<CustomerRecord>(Path::new("does/not/exist.csv"), "customer").unwrap_err();
        assert!(matches!(err, ExportError::Load { .. }));
    }
}
