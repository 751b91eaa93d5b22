pub mod file_trust_store;
