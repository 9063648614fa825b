// handlers/mod.rs - request handlers grouped by resource
//
// Handlers assume their middleware already ran: dataset handlers receive the
// resolved `Dataset` and, for mutations, the authenticated `AuthUser` as
// request extensions.

pub mod auth;
pub mod datasets;
pub mod health;

pub use health::health;
