//! Repository layer - Data access abstraction
//!
//! Each store is generic over the SeaORM connection so the same code runs
//! against the pool or inside a transaction.

pub(crate) mod entities;
mod movie_repository;
mod score_repository;
mod user_repository;

pub use movie_repository::{MovieRepository, MovieStore};
pub use score_repository::{ScoreRepository, ScoreStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use movie_repository::MockMovieRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use score_repository::MockScoreRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
