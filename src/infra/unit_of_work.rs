//! Unit of Work pattern implementation.
//!
//! Services never hold stores directly. Every operation asks the unit of work
//! for a transaction scope and reaches the movie, score and user stores
//! through the [`TransactionContext`] it is handed. The scope commits when the
//! closure returns `Ok` and rolls back otherwise.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseConnection, IsolationLevel, TransactionTrait};

use super::repositories::{
    MovieRepository, MovieStore, ScoreRepository, ScoreStore, UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Future returned by a transaction body; borrows the context it was given.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable with `automock` because of the generic methods; tests build a
/// context over mocked stores instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Execute a closure within a read-write transaction (read committed).
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a read-only transaction.
    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Store access for the duration of one transaction.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    movies: &'a dyn MovieRepository,
    scores: &'a dyn ScoreRepository,
    users: &'a dyn UserRepository,
}

impl<'a> TransactionContext<'a> {
    pub fn new(
        movies: &'a dyn MovieRepository,
        scores: &'a dyn ScoreRepository,
        users: &'a dyn UserRepository,
    ) -> Self {
        Self {
            movies,
            scores,
            users,
        }
    }

    pub fn movies(&self) -> &'a dyn MovieRepository {
        self.movies
    }

    pub fn scores(&self) -> &'a dyn ScoreRepository {
        self.scores
    }

    pub fn users(&self) -> &'a dyn UserRepository {
        self.users
    }
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn execute_transaction<F, T>(
        &self,
        isolation: IsolationLevel,
        access: AccessMode,
        f: F,
    ) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(access))
            .await
            .map_err(AppError::from)?;

        let outcome = {
            let movies = MovieStore::new(&txn);
            let scores = ScoreStore::new(&txn);
            let users = UserStore::new(&txn);
            f(TransactionContext::new(&movies, &scores, &users)).await
        };

        match outcome {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, AccessMode::ReadWrite, f)
            .await
    }

    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, AccessMode::ReadOnly, f)
            .await
    }
}
