//! Typed client for the dataset API: HTTP resource, navigation states and
//! the screen controller driven by the `datasets` CLI.

pub mod api;
pub mod controller;
pub mod error;
pub mod resource;
pub mod routes;
pub mod session;

pub use api::{ApiClient, DEFAULT_SERVER_URL};
pub use controller::{DatasetView, DatasetsController, Location};
pub use error::ClientError;
pub use resource::{DatasetsResource, DatasetsService};
pub use routes::ClientRoute;
pub use session::{Session, SignupPayload};
