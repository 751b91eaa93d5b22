pub mod delegation_service;
pub mod request_validator;
