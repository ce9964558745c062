use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct AppState {
    /// None in dummy mode or when DATABASE_URL is unset.
    /// Arc-wrapped because `DatabaseConnection` is not `Clone` when
    /// sea-orm's `mock` feature (used by the tests) is enabled.
    pub db: Option<Arc<DatabaseConnection>>,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Option<DatabaseConnection>, config: Config) -> Self {
        Self {
            db: db.map(Arc::new),
            config: Arc::new(config),
        }
    }

    /// Connection handle for data routes. Missing database configuration
    /// surfaces here, per request, as the generic 500.
    pub fn require_db(&self) -> ApiResult<&DatabaseConnection> {
        self.db
            .as_deref()
            .ok_or_else(|| ApiError::Internal("DATABASE_URL is not configured".to_string()))
    }
}
