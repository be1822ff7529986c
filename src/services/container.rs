//! Service Container - Centralized service access.
//!
//! Wires the SeaORM-backed unit of work and the task-local security context
//! into the concrete services, and hands them out as trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, MovieManager, MovieService, ScoreManager, ScoreService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;
use crate::utils::TaskLocalSecurityContext;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn movies(&self) -> Arc<dyn MovieService>;

    fn scores(&self) -> Arc<dyn ScoreService>;

    fn auth(&self) -> Arc<dyn AuthService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    movie_service: Arc<dyn MovieService>,
    score_service: Arc<dyn ScoreService>,
    auth_service: Arc<dyn AuthService>,
}

impl Services {
    /// Create a container from already-built services
    pub fn new(
        movie_service: Arc<dyn MovieService>,
        score_service: Arc<dyn ScoreService>,
        auth_service: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            movie_service,
            score_service,
            auth_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        let user_service: Arc<dyn UserService> = Arc::new(UserManager::new(
            uow.clone(),
            Arc::new(TaskLocalSecurityContext),
        ));
        let movie_service = Arc::new(MovieManager::new(uow.clone()));
        let score_service = Arc::new(ScoreManager::new(uow, user_service.clone()));
        let auth_service = Arc::new(Authenticator::new(user_service, config));

        Self {
            movie_service,
            score_service,
            auth_service,
        }
    }
}

impl ServiceContainer for Services {
    fn movies(&self) -> Arc<dyn MovieService> {
        self.movie_service.clone()
    }

    fn scores(&self) -> Arc<dyn ScoreService> {
        self.score_service.clone()
    }

    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }
}
