pub mod auth;
pub mod dataset;

pub use auth::{require_login, AuthUser};
pub use dataset::{dataset_by_id, has_authorization};
