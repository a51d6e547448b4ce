pub mod connection;
pub mod filter;
pub mod mapper;
pub mod properties;
pub mod records;
pub mod sales;
