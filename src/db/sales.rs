use rusqlite::named_params;
use tracing::debug;

use crate::db::connection::Database;
use crate::domain::{Identity, SaleHistory};
use crate::errors::Result;

/// Records a sale, with the same identity routing as `save_property`:
/// `New` inserts, `Existing` updates that id. Returns the effective sale
/// id. A property insert followed by sale inserts is not atomic; a crash
/// between them leaves a property with an empty history.
pub fn add_sale(db: &Database, sale: &SaleHistory) -> Result<i64> {
    db.with_conn(|conn| match sale.id {
        Identity::Existing(sale_history_id) => {
            debug!(sale_history_id, "updating sale");
            conn.execute(
                "UPDATE sale_history SET propertyId = :propertyId, salePrice = :salePrice, \
                 saleDate = :saleDate WHERE saleHistoryId = :saleHistoryId",
                named_params! {
                    ":propertyId": sale.property_id,
                    ":salePrice": sale.sale_price,
                    ":saleDate": sale.sale_date,
                    ":saleHistoryId": sale_history_id,
                },
            )?;
            Ok(sale_history_id)
        }
        Identity::New => {
            conn.execute(
                "INSERT INTO sale_history (propertyId, salePrice, saleDate) \
                 VALUES (:propertyId, :salePrice, :saleDate)",
                named_params! {
                    ":propertyId": sale.property_id,
                    ":salePrice": sale.sale_price,
                    ":saleDate": sale.sale_date,
                },
            )?;
            let sale_history_id = conn.last_insert_rowid();
            debug!(sale_history_id, "inserted sale");
            Ok(sale_history_id)
        }
    })
}
