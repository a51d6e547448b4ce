//! Row-to-entity reconstruction. Sale dates arrive from the store already
//! formatted as MM/DD/YYYY text (the SELECT projections apply
//! `strftime('%m/%d/%Y', …)`), so the mappers parse that form and nothing
//! else.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::Row;

use crate::domain::{Identity, Property, SaleHistory};

/// Boundary form of a sale date.
pub const SALE_DATE_FORMAT: &str = "%m/%d/%Y";

fn parse_sale_date(column: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, SALE_DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Builds a `Property` from a flat row plus an already-reconstructed sale
/// history. Expects `propertyId`, `address`, `city`, `zip` and `state`
/// columns.
pub fn property_from_row(row: &Row, sale_history: Vec<SaleHistory>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: Identity::Existing(row.get("propertyId")?),
        address: row.get("address")?,
        city: row.get("city")?,
        zip: row.get("zip")?,
        state: row.get("state")?,
        sale_history,
    })
}

/// Builds a `SaleHistory` from a full sale row: `saleHistoryId`,
/// `propertyId`, `salePrice`, `saleDate` (MM/DD/YYYY, column 3).
pub fn sale_from_row(row: &Row) -> rusqlite::Result<SaleHistory> {
    let date_text: String = row.get("saleDate")?;
    Ok(SaleHistory {
        id: Identity::Existing(row.get("saleHistoryId")?),
        property_id: row.get("propertyId")?,
        sale_price: row.get("salePrice")?,
        sale_date: parse_sale_date(3, &date_text)?,
    })
}

/// Reads the latest-sale columns joined onto a listing row (`saleDate` at
/// column 5, `salePrice` at column 6). Both are null when the property has
/// no sales; the synthetic entry carries no id of its own since the
/// aggregate does not project one.
pub fn latest_sale_from_row(row: &Row) -> rusqlite::Result<Option<SaleHistory>> {
    let date_text: Option<String> = row.get("saleDate")?;
    let sale_price: Option<f64> = row.get("salePrice")?;
    match (date_text, sale_price) {
        (Some(text), Some(price)) => Ok(Some(SaleHistory {
            id: Identity::New,
            property_id: row.get("propertyId")?,
            sale_price: price,
            sale_date: parse_sale_date(5, &text)?,
        })),
        _ => Ok(None),
    }
}
