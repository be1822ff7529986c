//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, MovieService, ScoreService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub movie_service: Arc<dyn MovieService>,
    pub score_service: Arc<dyn ScoreService>,
    pub auth_service: Arc<dyn AuthService>,
    /// Database handle for health checks; absent when services are injected
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, Some(database))
    }

    /// Create application state from any service container.
    pub fn new(services: &dyn ServiceContainer, database: Option<Arc<Database>>) -> Self {
        Self {
            movie_service: services.movies(),
            score_service: services.scores(),
            auth_service: services.auth(),
            database,
        }
    }
}
