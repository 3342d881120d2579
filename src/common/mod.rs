pub mod error;
pub mod escopo;
pub mod extract;
