//! Maps one invoice, with its customer and transaction, to an import row.

use crate::amount::Amount;
use crate::classify::{self, ContactDetails, Counterparty, CustomerFacts, GENERIC_COUNTERPARTY};
use crate::config::MappingSettings;
use crate::date;
use crate::error::RowError;
use crate::index::JoinIndex;
use crate::output::OutputRow;
use crate::records::{non_blank, CustomerRecord, InvoiceRecord, TransactionRecord};
use std::str::FromStr;

/// Collection data, present only when the invoice had to be settled by a
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Collection {
    amount: Amount,
    date: String,
}

/// Whether a paid invoice with something to collect must have a transaction.
///
/// `Amount Due` only matters for paid invoices. A blank amount counts as
/// due; only an amount that parses to zero waives the transaction.
pub fn requires_transaction(invoice: &InvoiceRecord) -> Result<bool, RowError> {
    if !invoice.is_paid() {
        return Ok(false);
    }
    if invoice.amount_due.trim().is_empty() {
        return Ok(true);
    }
    let amount_due = parse_amount(invoice, "Amount Due", &invoice.amount_due)?;
    Ok(!amount_due.is_zero())
}

/// Maps a billable invoice to its output row.
///
/// Pure: the result only depends on the arguments.
pub fn map_invoice(
    invoice: &InvoiceRecord,
    index: &JoinIndex<'_>,
    settings: &MappingSettings,
) -> Result<OutputRow, RowError> {
    let should_have_transaction = requires_transaction(invoice)?;
    let transaction = index.transaction_for(&invoice.id);

    if should_have_transaction && transaction.is_none() {
        return Err(RowError::MissingTransaction {
            invoice_id: invoice.id.clone(),
            number: invoice.number.clone(),
            amount_due: invoice.amount_due.clone(),
            amount_paid: invoice.amount_paid.clone(),
        });
    }

    let customer = index
        .customer(&invoice.customer)
        .ok_or_else(|| RowError::MissingCustomer {
            invoice_id: invoice.id.clone(),
            number: invoice.number.clone(),
            customer: invoice.customer.clone(),
        })?;

    let tax = parse_amount(invoice, "Tax", &invoice.tax)?;
    let total = parse_amount(invoice, "Total", &invoice.total)?;
    let gross = match transaction {
        Some(tx) => parse_amount(invoice, "gross", &tx.gross)?,
        None => total,
    };

    let tax_rate = classify::tax_rate(tax, total);
    let unit_price = gross
        .checked_div(Amount::ONE + tax_rate)
        .ok_or_else(|| RowError::NonFiniteUnitPrice {
            invoice_id: invoice.id.clone(),
            number: invoice.number.clone(),
        })?;

    let counterparty = counterparty(invoice, customer, tax_rate);
    let tax_code = classify::tax_code(&counterparty);

    let collection = match transaction {
        Some(tx) if should_have_transaction => Some(collection(invoice, tx, gross)?),
        _ => None,
    };

    let issue_date = reformat_date(invoice, "Date (UTC)", &invoice.date)?;

    Ok(assemble(
        invoice,
        issue_date,
        counterparty,
        unit_price,
        tax_rate,
        tax_code,
        gross,
        collection,
        settings,
    ))
}

/// Classifies the customer and, when itemized, gathers its contact details.
///
/// The invoice's address snapshot is preferred; the customer record fills a
/// blank name or country.
fn counterparty(invoice: &InvoiceRecord, customer: &CustomerRecord, rate: Amount) -> Counterparty {
    let facts = CustomerFacts {
        name: non_blank(&invoice.customer_name).or_else(|| non_blank(&customer.name)),
        country: non_blank(&invoice.address_country).or_else(|| non_blank(&customer.country)),
        tax_id: customer.tax_id(),
    };

    if classify::is_generic(rate, &facts) {
        return Counterparty::Generic;
    }

    Counterparty::Identified(ContactDetails {
        name: facts.name.unwrap_or_default().to_string(),
        nif: facts.tax_id.unwrap_or(invoice.customer.trim()).to_string(),
        address: [invoice.address_line1.trim(), invoice.address_line2.trim()]
            .iter()
            .filter(|line| !line.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" - "),
        city: invoice.address_city.clone(),
        postal_code: invoice.address_zip.clone(),
        province: invoice.address_state.clone(),
        country: facts.country.unwrap_or_default().to_string(),
    })
}

fn collection(
    invoice: &InvoiceRecord,
    transaction: &TransactionRecord,
    gross: Amount,
) -> Result<Collection, RowError> {
    Ok(Collection {
        amount: gross,
        date: reformat_date(invoice, "available_on", &transaction.available_on)?,
    })
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    invoice: &InvoiceRecord,
    issue_date: String,
    counterparty: Counterparty,
    unit_price: Amount,
    tax_rate: Amount,
    tax_code: classify::TaxCode,
    gross: Amount,
    collection: Option<Collection>,
    settings: &MappingSettings,
) -> OutputRow {
    let (contact_name, contact_nif, address, city, postal_code, province, country) =
        match counterparty {
            Counterparty::Generic => (
                None,
                GENERIC_COUNTERPARTY.to_string(),
                None,
                None,
                None,
                None,
                None,
            ),
            Counterparty::Identified(contact) => (
                Some(contact.name),
                contact.nif,
                Some(contact.address),
                Some(contact.city),
                Some(contact.postal_code),
                Some(contact.province),
                Some(contact.country),
            ),
        };

    let (collected_amount, collected_date, due_date) = match collection {
        Some(c) => (Some(c.amount), Some(c.date.clone()), Some(c.date)),
        None => (None, None, None),
    };

    OutputRow {
        invoice_num: invoice.number.trim().to_string(),
        date: issue_date,
        description: invoice.subscription.clone(),
        contact_name,
        contact_nif,
        address,
        city,
        postal_code,
        province,
        country,
        concept: invoice.subscription.clone(),
        product_description: settings.product_description.clone(),
        sku: 1,
        unit_price,
        units: 1,
        discount_percent: 0,
        tax_rate,
        tax_code,
        sales_account: settings.sales_account.clone(),
        charge_account: settings.charge_account.clone(),
        collected_amount,
        collected_date,
        due_date,
        gross,
    }
}

fn parse_amount(invoice: &InvoiceRecord, field: &'static str, value: &str) -> Result<Amount, RowError> {
    Amount::from_str(value).map_err(|_| RowError::InvalidAmount {
        invoice_id: invoice.id.clone(),
        number: invoice.number.clone(),
        field,
        value: value.to_string(),
    })
}

fn reformat_date(invoice: &InvoiceRecord, field: &'static str, value: &str) -> Result<String, RowError> {
    date::to_day_month_year(value).ok_or_else(|| RowError::InvalidDate {
        invoice_id: invoice.id.clone(),
        number: invoice.number.clone(),
        field,
        value: value.to_string(),
    })
}
