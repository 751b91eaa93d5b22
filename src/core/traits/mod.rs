pub mod certificate_parser;
pub mod collection;
pub mod transport;
