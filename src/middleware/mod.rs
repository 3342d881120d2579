pub mod auth;
pub mod trial;
