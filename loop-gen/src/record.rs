use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::money::Money;
use crate::status::{LoopDates, LoopStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street_number: u32,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub county: String,
    pub country: String,
}

impl Address {
    /// `123 Main St`
    #[must_use]
    pub fn street_line(&self) -> String {
        format!("{} {}", self.street_number, self.street_name)
    }

    /// `Atlanta, GA 30000`
    #[must_use]
    pub fn locality(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }

    /// `123 Main St, Atlanta, GA 30000`
    #[must_use]
    pub fn full(&self) -> String {
        format!("{}, {}", self.street_line(), self.locality())
    }
}

/// Commission paid on a loop. Each side is either zero or `price × rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commission {
    pub rate: Decimal,
    pub buy_side: Money,
    pub sell_side: Money,
    pub total: Money,
    pub double_ended: bool,
    /// The office's retained share of `total`, when the profile splits it.
    pub company_dollar: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDetails {
    pub bathrooms: u32,
    pub bedrooms: u32,
    pub lot_size: u32,
    pub square_footage: u32,
    pub year_built: u32,
    pub mls_number: u32,
    pub hoa_dues: Option<u32>,
}

/// One fully derived transaction, before it is rendered to strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub id: u64,
    pub status: LoopStatus,
    pub property_type: String,
    pub agent: String,
    pub lead_source: String,
    pub address: Address,
    pub price: Money,
    pub original_price: Money,
    pub dates: LoopDates,
    pub commission: Commission,
    pub details: PropertyDetails,
}

/// A rendered row: header name to formatted cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<&'static str, String>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Record::default()
    }

    pub fn insert(&mut self, field: &'static str, value: String) {
        self.fields.insert(field, value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The cell for `field`, empty when the record has no such field.
    #[must_use]
    pub fn cell(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_lines() {
        let address = Address {
            street_number: 123,
            street_name: "Main St".to_owned(),
            city: "Atlanta".to_owned(),
            state: "GA".to_owned(),
            zip: "30000".to_owned(),
            county: "Fulton".to_owned(),
            country: "USA".to_owned(),
        };
        assert_eq!(address.street_line(), "123 Main St");
        assert_eq!(address.locality(), "Atlanta, GA 30000");
        assert_eq!(address.full(), "123 Main St, Atlanta, GA 30000");
    }

    #[test]
    fn test_record_missing_cells_are_empty() {
        let mut record = Record::new();
        assert!(record.is_empty());
        record.insert("Loop ID", "300000000".to_owned());
        assert_eq!(record.cell("Loop ID"), "300000000");
        assert_eq!(record.cell("Tags"), "");
        assert!(record.get("Tags").is_none());
        assert_eq!(record.len(), 1);
    }
}
