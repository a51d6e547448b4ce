use chrono::NaiveDate;

use crate::db::connection::Database;
use crate::db::{properties, sales};
use crate::domain::{Property, SaleHistory};

/// Fresh in-memory database with the production schema applied.
pub fn init_test_db() -> Database {
    let db = Database::open_in_memory().expect("open in-memory database");
    db.init_schema().expect("apply schema");
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Inserts a property and returns its generated id.
pub fn insert_property(db: &Database, address: &str, city: &str, zip: &str, state: &str) -> i64 {
    let prop = Property::new(address, city, zip, state);
    properties::save_property(db, &prop).expect("insert property")
}

/// Inserts a sale for a property and returns the generated sale id.
pub fn insert_sale(db: &Database, property_id: i64, price: f64, sale_date: NaiveDate) -> i64 {
    let sale = SaleHistory::new(property_id, price, sale_date);
    sales::add_sale(db, &sale).expect("insert sale")
}
