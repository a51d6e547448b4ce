//! Data-access layer for a real-estate record catalog.
//!
//! Persists [`domain::Property`] records and their [`domain::SaleHistory`]
//! events in SQLite, and reconstructs them with caller-supplied filtering,
//! ordering and pagination described by a [`db::filter::FilterSpec`]. The
//! presentation layer is elsewhere; it talks only to the functions in
//! [`db::properties`], [`db::sales`] and [`db::records`] and consumes plain
//! entities.

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;

pub use config::CatalogConfig;
pub use db::connection::Database;
pub use db::filter::{Direction, FilterSpec, FilterValue, Limit, Order};
pub use domain::{Identity, Property, SaleHistory};
pub use errors::{CatalogError, Result};

#[cfg(test)]
mod tests;
