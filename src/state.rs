use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, DatasetRepository, UserRepository};

/// Everything a request handler may touch, injected through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseManager,
    pub datasets: DatasetRepository,
    pub users: UserRepository,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseManager) -> Self {
        let pool = db.pool().clone();
        Self {
            config: Arc::new(config),
            datasets: DatasetRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            db,
        }
    }
}
