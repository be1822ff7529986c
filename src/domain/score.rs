//! Score domain entity: one user's rating of one movie.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A user's score for a movie. Keyed by (user, movie).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub movie_id: i64,
    pub user_id: i64,
    pub value: f64,
}

/// Score submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDto {
    #[schema(example = 1)]
    pub movie_id: i64,
    #[validate(range(min = 0.0, max = 5.0, message = "Score must be between 0 and 5"))]
    #[schema(example = 4.5, minimum = 0.0, maximum = 5.0)]
    pub score: f64,
}
