pub mod parsers;
pub mod transport;
pub mod trust_store;
