use chrono::NaiveDate;

use crate::errors::{CatalogError, Result};

/// Persistence state of a record. `New` always routes to an INSERT,
/// `Existing` always routes to an UPDATE keyed on the wrapped id; nothing
/// else is ever consulted to decide. An id of 0 is a legitimate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity {
    New,
    Existing(i64),
}

impl Identity {
    pub fn existing(self) -> Option<i64> {
        match self {
            Identity::New => None,
            Identity::Existing(id) => Some(id),
        }
    }
}

/// A property record together with its sale history. Immutable once built;
/// repository operations never mutate it, they return fresh instances
/// reconstructed from rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Identity,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub state: String,
    /// Empty for unsold properties. The listing path fills in at most the
    /// latest sale; the single-property path fills in the full history.
    pub sale_history: Vec<SaleHistory>,
}

impl Property {
    /// A not-yet-persisted property with no sale history.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Property {
            id: Identity::New,
            address: address.into(),
            city: city.into(),
            zip: zip.into(),
            state: state.into(),
            sale_history: Vec::new(),
        }
    }

    /// Required-field check, run before any store interaction.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("address", &self.address),
            ("city", &self.city),
            ("zip", &self.zip),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::Validation {
                    entity: "property",
                    field,
                });
            }
        }
        Ok(())
    }
}

/// One sale event for a property. Crosses the SQL boundary with the date as
/// MM/DD/YYYY text; held here as a plain date.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleHistory {
    pub id: Identity,
    pub property_id: i64,
    pub sale_price: f64,
    pub sale_date: NaiveDate,
}

impl SaleHistory {
    pub fn new(property_id: i64, sale_price: f64, sale_date: NaiveDate) -> Self {
        SaleHistory {
            id: Identity::New,
            property_id,
            sale_price,
            sale_date,
        }
    }
}
