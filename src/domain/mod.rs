pub mod property;

pub use property::{Identity, Property, SaleHistory};
