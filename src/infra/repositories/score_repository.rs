//! Score store: one score per (user, movie).

use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::score::{self, ActiveModel, Entity as ScoreEntity};
use crate::domain::Score;
use crate::errors::StoreResult;

/// Score store trait
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Insert or replace the user's score for a movie, written immediately
    async fn save_and_flush(&self, score: Score) -> StoreResult<Score>;

    /// All scores recorded for a movie
    async fn find_by_movie(&self, movie_id: i64) -> StoreResult<Vec<Score>>;
}

/// SeaORM score store over any connection or transaction
pub struct ScoreStore<'c, C: ConnectionTrait> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> ScoreStore<'c, C> {
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'c, C> ScoreRepository for ScoreStore<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn save_and_flush(&self, score: Score) -> StoreResult<Score> {
        let active = ActiveModel {
            user_id: Set(score.user_id),
            movie_id: Set(score.movie_id),
            value: Set(score.value),
        };

        ScoreEntity::insert(active)
            .on_conflict(
                OnConflict::columns([score::Column::UserId, score::Column::MovieId])
                    .update_column(score::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(score)
    }

    async fn find_by_movie(&self, movie_id: i64) -> StoreResult<Vec<Score>> {
        let models = ScoreEntity::find()
            .filter(score::Column::MovieId.eq(movie_id))
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(Score::from).collect())
    }
}
