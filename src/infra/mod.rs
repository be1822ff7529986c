//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - SeaORM entities and the movie, score and user stores
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    MovieRepository, MovieStore, ScoreRepository, ScoreStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockMovieRepository, MockScoreRepository, MockUserRepository};
