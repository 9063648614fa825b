pub mod auth;
pub mod datasets;
