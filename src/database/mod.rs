pub mod manager;
pub mod models;
pub mod repository;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::DatasetRepository;
pub use users::{NewUser, UserRepository};
