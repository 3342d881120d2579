pub mod auth;
pub mod crm;
pub mod dashboard;
pub mod tenancy;
