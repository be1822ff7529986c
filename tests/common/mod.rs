//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;

use movie_catalog::config::{Config, ROLE_ADMIN, ROLE_CLIENT};
use movie_catalog::domain::{Movie, MovieDto, Role, Score, User, UserDetailsProjection};
use movie_catalog::errors::AppResult;
use movie_catalog::infra::{
    MockMovieRepository, MockScoreRepository, MockUserRepository, TransactionContext, TxFuture,
    UnitOfWork,
};

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-chars!!";

pub fn test_config() -> Config {
    Config::builder(TEST_SECRET).build().unwrap()
}

pub fn movie(id: i64) -> Movie {
    Movie {
        id,
        title: "Bob Esponja".to_string(),
        synopsis: Some("Bob Esponja vai para a cidade".to_string()),
        score: 0.0,
        count: 0,
        image: "https://example.com/bob.jpg".to_string(),
    }
}

pub fn movie_dto() -> MovieDto {
    MovieDto {
        id: 0,
        title: "Bob Esponja".to_string(),
        synopsis: Some("Bob Esponja vai para a cidade".to_string()),
        score: 0.0,
        count: 0,
        image: "https://example.com/bob.jpg".to_string(),
    }
}

pub fn score(movie_id: i64, user_id: i64, value: f64) -> Score {
    Score {
        movie_id,
        user_id,
        value,
    }
}

pub fn client_user() -> User {
    User {
        id: 1,
        name: "Maria".to_string(),
        username: "maria@gmail.com".to_string(),
        password_hash: "hash".to_string(),
        roles: vec![Role::new(1, ROLE_CLIENT)],
    }
}

pub fn admin_projections() -> Vec<UserDetailsProjection> {
    [(1, ROLE_CLIENT), (2, ROLE_ADMIN)]
        .into_iter()
        .map(|(role_id, authority)| UserDetailsProjection {
            username: "alex@gmail.com".to_string(),
            password: "hash".to_string(),
            role_id,
            authority: authority.to_string(),
        })
        .collect()
}

/// Unit of work that hands the mocked stores straight to the transaction body
#[derive(Default)]
pub struct TestUnitOfWork {
    pub movies: MockMovieRepository,
    pub scores: MockScoreRepository,
    pub users: MockUserRepository,
}

impl TestUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> TransactionContext<'_> {
        TransactionContext::new(&self.movies, &self.scores, &self.users)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        f(self.context()).await
    }

    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        f(self.context()).await
    }
}
