pub mod error;
pub mod money;
