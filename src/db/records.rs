use tracing::debug;

use crate::db::connection::Database;
use crate::db::filter::{self, FilterSpec};
use crate::errors::Result;

/// Counts rows in `table` under `filter`, with WHERE terms qualified by the
/// table name. The counted column is `<table>Id`: every table's primary key
/// follows that naming scheme, and this function depends on it.
pub fn record_count(db: &Database, table: &str, spec: Option<&FilterSpec>) -> Result<i64> {
    let sql_filter = filter::translate(spec, Some(table));
    let query = format!(
        "SELECT count({table}Id) FROM {table}{}",
        sql_filter.clause
    );
    debug!(%query, "counting records");

    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&query)?;
        let count = stmt.query_row(&sql_filter.bindings()[..], |row| row.get(0))?;
        Ok(count)
    })
}
