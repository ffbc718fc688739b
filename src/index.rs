//! Lookup tables joining invoices to their transaction and customer.

use crate::diagnostics::Diagnostics;
use crate::records::{CustomerRecord, TransactionRecord};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Read-only join index built once per run.
///
/// When several rows share a key the first one in load order wins; the
/// others are ignored and reported to the diagnostics collector.
#[derive(Debug, Default)]
pub struct JoinIndex<'a> {
    /// Transactions keyed by the invoice they settle.
    transactions: HashMap<&'a str, &'a TransactionRecord>,

    /// Customers keyed by customer id.
    customers: HashMap<&'a str, &'a CustomerRecord>,
}

impl<'a> JoinIndex<'a> {
    pub fn build(
        customers: &'a [CustomerRecord],
        transactions: &'a [TransactionRecord],
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut index = JoinIndex {
            transactions: HashMap::with_capacity(transactions.len()),
            customers: HashMap::with_capacity(customers.len()),
        };

        let mut duplicate_transactions: HashMap<&str, usize> = HashMap::new();
        for tx in transactions {
            match index.transactions.entry(tx.invoice_id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(tx);
                }
                Entry::Occupied(_) => {
                    *duplicate_transactions.entry(tx.invoice_id.as_str()).or_default() += 1;
                }
            }
        }

        let mut duplicate_customers: HashMap<&str, usize> = HashMap::new();
        for customer in customers {
            match index.customers.entry(customer.id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(customer);
                }
                Entry::Occupied(_) => {
                    *duplicate_customers.entry(customer.id.as_str()).or_default() += 1;
                }
            }
        }

        let mut duplicate_transactions: Vec<_> = duplicate_transactions.into_iter().collect();
        duplicate_transactions.sort();
        for (invoice_id, ignored) in duplicate_transactions {
            let message = format!(
                "invoice {} has {} extra transaction(s); using the first one",
                invoice_id, ignored
            );
            debug!("{}", message);
            diagnostics.warn(invoice_id, message);
        }

        let mut duplicate_customers: Vec<_> = duplicate_customers.into_iter().collect();
        duplicate_customers.sort();
        for (customer_id, ignored) in duplicate_customers {
            let message = format!(
                "customer {} appears {} extra time(s); using the first one",
                customer_id, ignored
            );
            debug!("{}", message);
            diagnostics.warn(customer_id, message);
        }

        index
    }

    /// Finds the transaction settling `invoice_id`.
    pub fn transaction_for(&self, invoice_id: &str) -> Option<&'a TransactionRecord> {
        self.transactions.get(invoice_id).copied()
    }

    /// Finds the customer with id `customer_id`.
    pub fn customer(&self, customer_id: &str) -> Option<&'a CustomerRecord> {
        self.customers.get(customer_id).copied()
    }
}
