//! Score service - records a user's score and refreshes the movie aggregate.

use async_trait::async_trait;
use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::UserService;
use crate::config::{MAX_SCORE, MIN_SCORE};
use crate::domain::{MovieDto, Score, ScoreDto};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Score service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScoreService: Send + Sync {
    /// Record the logged-in user's score for a movie and return the movie
    /// with its recomputed score and count.
    async fn save_score(&self, dto: ScoreDto) -> AppResult<MovieDto>;
}

/// Concrete implementation of ScoreService using Unit of Work.
pub struct ScoreManager<U: UnitOfWork> {
    uow: Arc<U>,
    user_service: Arc<dyn UserService>,
}

impl<U: UnitOfWork> ScoreManager<U> {
    pub fn new(uow: Arc<U>, user_service: Arc<dyn UserService>) -> Self {
        Self { uow, user_service }
    }
}

#[async_trait]
impl<U: UnitOfWork> ScoreService for ScoreManager<U> {
    async fn save_score(&self, dto: ScoreDto) -> AppResult<MovieDto> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&dto.score) {
            return Err(AppError::validation(format!(
                "Score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }

        let user = self.user_service.authenticated().await?;
        let user_id = user.id;

        let movie = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut movie = ctx
                        .movies()
                        .find_by_id(dto.movie_id)
                        .await?
                        .ok_or_not_found(&format!("Movie {}", dto.movie_id))?;

                    let saved = ctx
                        .scores()
                        .save_and_flush(Score {
                            movie_id: movie.id,
                            user_id,
                            value: dto.score,
                        })
                        .await?;

                    // Count the submitting user once, with the value just saved
                    let mut scores: Vec<Score> = ctx
                        .scores()
                        .find_by_movie(movie.id)
                        .await?
                        .into_iter()
                        .filter(|s| s.user_id != user_id)
                        .collect();
                    scores.push(saved);

                    movie.recompute_score(&scores);
                    let movie = ctx.movies().save(movie).await?;
                    Ok::<_, AppError>(movie)
                })
            })
            .await?;

        tracing::info!(
            movie_id = movie.id,
            user_id,
            score = movie.score,
            count = movie.count,
            "Score recorded"
        );

        Ok(MovieDto::from(movie))
    }
}
