pub mod assigner;
pub mod validation;
