//! The accounting-import row and its CSV writer.

use crate::amount::Amount;
use crate::classify::TaxCode;
use crate::error::Result;
use serde::{Serialize, Serializer};
use std::io::Write;

/// Column header of the import file, in output order.
pub const COLUMNS: [&str; 23] = [
    "Invoice num",
    "Date dd/mm/yyyy",
    "Description",
    "Contact name",
    "Contact NIF",
    "Address",
    "City",
    "Postal code",
    "Province",
    "Country",
    "Concept",
    "Product description",
    "SKU",
    "Unit price",
    "Units",
    "Discount %",
    "IVA %",
    "Tax code",
    "Sales account",
    "Charge account",
    "Collected amount",
    "Collected date",
    "Due date dd/mm/yyyy",
];

/// Decimals written for the unit price. Enough to rebuild the gross amount.
pub const PRICE_DECIMALS: u32 = 4;

/// Decimals written for collected money.
pub const MONEY_DECIMALS: u32 = 2;

/// Decimals written for the tax rate, a fraction such as `0,21`.
pub const RATE_DECIMALS: u32 = 2;

/// One invoice in the accounting-import layout.
///
/// Field order matches [`COLUMNS`]. Contact fields other than the NIF are
/// blank for the generic counterparty; collection fields are blank when the
/// invoice needed no transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub invoice_num: String,
    pub date: String,
    pub description: String,
    pub contact_name: Option<String>,
    pub contact_nif: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub concept: String,
    pub product_description: String,
    pub sku: u32,
    #[serde(serialize_with = "price")]
    pub unit_price: Amount,
    pub units: u32,
    pub discount_percent: u32,
    #[serde(serialize_with = "rate")]
    pub tax_rate: Amount,
    #[serde(serialize_with = "tax_code")]
    pub tax_code: TaxCode,
    pub sales_account: String,
    pub charge_account: String,
    #[serde(serialize_with = "optional_money")]
    pub collected_amount: Option<Amount>,
    pub collected_date: Option<String>,
    pub due_date: Option<String>,

    /// Tax-inclusive amount the unit price was derived from. Not exported.
    #[serde(skip)]
    pub gross: Amount,
}

fn price<S: Serializer>(value: &Amount, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_comma_string(PRICE_DECIMALS))
}

fn rate<S: Serializer>(value: &Amount, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_comma_string(RATE_DECIMALS))
}

fn tax_code<S: Serializer>(value: &TaxCode, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_str())
}

fn optional_money<S: Serializer>(
    value: &Option<Amount>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(amount) => serializer.serialize_str(&amount.to_comma_string(MONEY_DECIMALS)),
        None => serializer.serialize_none(),
    }
}

/// Writes the header and every row as CSV.
pub fn write_rows<W: Write>(rows: &[OutputRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}
