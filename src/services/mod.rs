//! Application services layer - Use cases and business logic.
//!
//! Services depend on store traits through the Unit of Work and on each
//! other through service traits, so every collaborator can be mocked.

mod auth_service;
pub mod container;
mod movie_service;
mod score_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use movie_service::{MovieManager, MovieService};
pub use score_service::{ScoreManager, ScoreService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use movie_service::MockMovieService;
#[cfg(any(test, feature = "test-utils"))]
pub use score_service::MockScoreService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
