use rusqlite::{named_params, OptionalExtension};
use tracing::debug;

use crate::db::connection::Database;
use crate::db::filter::{self, FilterSpec};
use crate::db::mapper;
use crate::domain::{Identity, Property};
use crate::errors::Result;

/// Saves a property, routing solely on its identity tag: `New` inserts and
/// returns the generated id, `Existing` updates that id and returns it
/// unchanged. Validation runs before the store is touched.
pub fn save_property(db: &Database, property: &Property) -> Result<i64> {
    property.validate()?;
    db.with_conn(|conn| match property.id {
        Identity::Existing(property_id) => {
            debug!(property_id, "updating property");
            conn.execute(
                "UPDATE property SET address = :address, city = :city, zip = :zip, state = :state \
                 WHERE propertyId = :propertyId",
                named_params! {
                    ":address": property.address,
                    ":city": property.city,
                    ":zip": property.zip,
                    ":state": property.state,
                    ":propertyId": property_id,
                },
            )?;
            Ok(property_id)
        }
        Identity::New => {
            conn.execute(
                "INSERT INTO property (address, city, zip, state) \
                 VALUES (:address, :city, :zip, :state)",
                named_params! {
                    ":address": property.address,
                    ":city": property.city,
                    ":zip": property.zip,
                    ":state": property.state,
                },
            )?;
            // Same connection as the insert, so this is the row just added.
            let property_id = conn.last_insert_rowid();
            debug!(property_id, "inserted property");
            Ok(property_id)
        }
    })
}

/// Fetches one property with its full sale history, oldest sale first.
/// Returns `None` when no such property exists.
pub fn get_property(db: &Database, property_id: i64) -> Result<Option<Property>> {
    db.with_conn(|conn| {
        let property = conn
            .query_row(
                "SELECT propertyId, address, city, zip, state FROM property \
                 WHERE propertyId = :propertyId",
                named_params! { ":propertyId": property_id },
                |row| mapper::property_from_row(row, Vec::new()),
            )
            .optional()?;

        let Some(mut property) = property else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT saleHistoryId, propertyId, salePrice, \
                    strftime('%m/%d/%Y', saleDate) AS saleDate \
             FROM sale_history WHERE propertyId = :propertyId \
             ORDER BY sale_history.saleDate",
        )?;
        let sales = stmt.query_map(named_params! { ":propertyId": property_id }, |row| {
            mapper::sale_from_row(row)
        })?;

        let mut sale_history = Vec::new();
        for sale in sales {
            sale_history.push(sale?);
        }
        property.sale_history = sale_history;
        Ok(Some(property))
    })
}

/// Lists properties matching `filter` (WHERE terms qualified with the
/// `property` table), each carrying at most its latest sale. The latest
/// sale comes from a per-property `max(saleDate)` aggregate left-joined
/// onto the listing, so unsold properties still appear, with an empty
/// history.
pub fn get_properties(db: &Database, spec: Option<&FilterSpec>) -> Result<Vec<Property>> {
    let sql_filter = filter::translate(spec, Some("property"));
    let query = format!(
        "SELECT property.propertyId, property.address, property.city, property.zip, \
                property.state, ph.saleDate, ph.salePrice \
         FROM property \
         LEFT OUTER JOIN (SELECT propertyId, \
                                 strftime('%m/%d/%Y', max(saleDate)) AS saleDate, \
                                 salePrice \
                          FROM sale_history GROUP BY propertyId) ph \
           ON property.propertyId = ph.propertyId{}",
        sql_filter.clause
    );
    debug!(%query, "listing properties");

    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(&sql_filter.bindings()[..], |row| {
            let latest = mapper::latest_sale_from_row(row)?;
            mapper::property_from_row(row, latest.into_iter().collect())
        })?;

        let mut properties = Vec::new();
        for property in rows {
            properties.push(property?);
        }
        Ok(properties)
    })
}

/// Deletes the property row only; sale history rows are not cascaded by
/// this layer. Returns whether a row was actually removed.
pub fn delete_property(db: &Database, property_id: i64) -> Result<bool> {
    db.with_conn(|conn| {
        let affected = conn.execute(
            "DELETE FROM property WHERE propertyId = :propertyId",
            named_params! { ":propertyId": property_id },
        )?;
        Ok(affected > 0)
    })
}
