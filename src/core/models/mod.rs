pub mod certificate;
pub mod delegation_role;
pub mod staged_change;
