//! Tax treatment and counterparty classification.
//!
//! These rules decide how the accounting import sees a customer: either as
//! the generic `CLIENTS_VARIS` counterparty or with its full identity, and
//! which tax regime code the invoice is booked under.

use crate::amount::Amount;
use std::fmt;

/// Placeholder NIF of the generic counterparty.
pub const GENERIC_COUNTERPARTY: &str = "CLIENTS_VARIS";

/// Country code of the domestic tax jurisdiction.
pub const DOMESTIC_COUNTRY: &str = "ES";

/// Prefix of identifiers that are not VAT numbers. Customers without a tax id
/// fall back to their billing-platform id, which starts with it.
pub const NON_VAT_ID_PREFIX: &str = "cus";

/// Flat VAT rate applied to every taxed invoice.
pub const FLAT_VAT_RATE: Amount = Amount::from_parts(21, 2);

/// Tax rate of an invoice: the flat rate when it was taxed at all.
///
/// Partial tax amounts still book at the flat rate; the ratio
/// `tax / (total - tax)` is not used.
pub fn tax_rate(tax: Amount, total: Amount) -> Amount {
    if !tax.is_zero() && !total.is_zero() {
        FLAT_VAT_RATE
    } else {
        Amount::ZERO
    }
}

/// Tax regime label understood by the accounting import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxCode {
    /// Domestic sale at 21%.
    Domestic21,
    /// Sale outside the VAT area.
    Export,
    /// Sale to a VAT-registered business in another member state.
    IntraCommunity,
}

impl TaxCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCode::Domestic21 => "s_iva_21",
            TaxCode::Export => "s_iva_exportaciones",
            TaxCode::IntraCommunity => "s_iva_intracomunitario",
        }
    }
}

impl fmt::Display for TaxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity the customer is booked under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterparty {
    Generic,
    Identified(ContactDetails),
}

/// Full contact identity of an itemized counterparty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    /// Tax id, or the customer reference when there is none.
    pub nif: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub province: String,
    pub country: String,
}

/// What the classifier needs to know about the customer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerFacts<'a> {
    pub name: Option<&'a str>,
    pub country: Option<&'a str>,
    pub tax_id: Option<&'a str>,
}

/// Whether the invoice is booked against the generic counterparty.
///
/// Taxed sales abroad, customers without a name or country, and domestic
/// customers without a tax id are not itemized.
pub fn is_generic(rate: Amount, facts: &CustomerFacts<'_>) -> bool {
    match (facts.name, facts.country) {
        (Some(_), Some(country)) => {
            let domestic = country == DOMESTIC_COUNTRY;
            (rate == FLAT_VAT_RATE && !domestic) || (domestic && facts.tax_id.is_none())
        }
        _ => true,
    }
}

/// Picks the tax code. The generic check always comes first.
pub fn tax_code(counterparty: &Counterparty) -> TaxCode {
    match counterparty {
        Counterparty::Generic => TaxCode::Domestic21,
        Counterparty::Identified(contact) => {
            if contact.nif.starts_with(NON_VAT_ID_PREFIX) {
                TaxCode::Export
            } else if contact.nif.starts_with(DOMESTIC_COUNTRY) {
                TaxCode::Domestic21
            } else {
                TaxCode::IntraCommunity
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn facts<'a>(country: &'a str, tax_id: Option<&'a str>) -> CustomerFacts<'a> {
        CustomerFacts {
            name: Some("Acme"),
            country: Some(country),
            tax_id,
        }
    }

    fn identified(nif: &str) -> Counterparty {
        Counterparty::Identified(ContactDetails {
            nif: nif.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_tax_rate_is_flat() {
        assert_eq!(tax_rate(amt("2,10"), amt("10,00")), FLAT_VAT_RATE);
        // A ratio would give 0.10 here; the flat rate still applies.
        assert_eq!(tax_rate(amt("1,00"), amt("11,00")), FLAT_VAT_RATE);
        assert_eq!(tax_rate(amt("0,00"), amt("10,00")), Amount::ZERO);
        assert_eq!(tax_rate(amt("2,10"), amt("0,00")), Amount::ZERO);
    }

    #[test]
    fn test_domestic_customer_with_tax_id_is_identified() {
        assert!(!is_generic(FLAT_VAT_RATE, &facts("ES", Some("ESB12345678"))));
    }

    #[test]
    fn test_taxed_foreign_customer_is_generic() {
        assert!(is_generic(FLAT_VAT_RATE, &facts("FR", Some("FR123"))));
    }

    #[test]
    fn test_untaxed_foreign_customer_is_identified() {
        assert!(!is_generic(Amount::ZERO, &facts("DE", Some("DE123"))));
        assert!(!is_generic(Amount::ZERO, &facts("US", None)));
    }

    #[test]
    fn test_domestic_customer_without_tax_id_is_generic() {
        assert!(is_generic(Amount::ZERO, &facts("ES", None)));
    }

    #[test]
    fn test_country_code_matches_exactly() {
        // Lowercase "es" is not the domestic code, same as the "ES" tax id prefix.
        assert!(is_generic(FLAT_VAT_RATE, &facts("es", Some("ESB12345678"))));
        assert!(!is_generic(Amount::ZERO, &facts("es", None)));
        assert_eq!(tax_code(&identified("esB12345678")), TaxCode::IntraCommunity);
    }

    #[test]
    fn test_missing_name_or_country_is_generic() {
        let no_name = CustomerFacts {
            name: None,
            country: Some("DE"),
            tax_id: Some("DE123"),
        };
        let no_country = CustomerFacts {
            name: Some("Acme"),
            country: None,
            tax_id: Some("DE123"),
        };
        assert!(is_generic(Amount::ZERO, &no_name));
        assert!(is_generic(Amount::ZERO, &no_country));
    }

    #[test]
    fn test_tax_code_order() {
        assert_eq!(tax_code(&Counterparty::Generic), TaxCode::Domestic21);
        assert_eq!(tax_code(&identified("cus_ABC123")), TaxCode::Export);
        assert_eq!(tax_code(&identified("ESB12345678")), TaxCode::Domestic21);
        assert_eq!(tax_code(&identified("DE123456789")), TaxCode::IntraCommunity);
    }

    #[test]
    fn test_tax_code_labels() {
        assert_eq!(TaxCode::Domestic21.to_string(), "s_iva_21");
        assert_eq!(TaxCode::Export.as_str(), "s_iva_exportaciones");
        assert_eq!(TaxCode::IntraCommunity.as_str(), "s_iva_intracomunitario");
    }
}
