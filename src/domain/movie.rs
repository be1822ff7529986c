//! Movie domain entity and its data transfer view.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Score;

/// Movie domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub synopsis: Option<String>,
    /// Mean of all scores given to this movie
    pub score: f64,
    /// Number of scores behind `score`
    pub count: i32,
    pub image: String,
}

impl Movie {
    /// Overwrite the fields a client may edit.
    ///
    /// The aggregate score and count are left untouched.
    pub fn apply(&mut self, draft: NewMovie) {
        self.title = draft.title;
        self.synopsis = draft.synopsis;
        self.image = draft.image;
    }

    /// Recompute the aggregate from the full set of this movie's scores.
    pub fn recompute_score(&mut self, scores: &[Score]) {
        self.count = scores.len() as i32;
        self.score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.value).sum::<f64>() / scores.len() as f64
        };
    }
}

/// Fields needed to create a movie; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub synopsis: Option<String>,
    pub image: String,
}

impl NewMovie {
    /// A freshly created movie has no scores yet.
    pub fn into_movie(self, id: i64) -> Movie {
        Movie {
            id,
            title: self.title,
            synopsis: self.synopsis,
            score: 0.0,
            count: 0,
            image: self.image,
        }
    }
}

/// Movie view used for both requests and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct MovieDto {
    /// Ignored on input
    #[serde(default)]
    #[schema(example = 1)]
    pub id: i64,
    #[validate(length(min = 5, max = 80, message = "Title must be between 5 and 80 characters"))]
    #[schema(example = "The Witcher")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "A mutated monster hunter struggles to find his place.")]
    pub synopsis: Option<String>,
    /// Derived; ignored on input
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Score must be zero or positive"))]
    #[schema(example = 4.5)]
    pub score: f64,
    /// Derived; ignored on input
    #[serde(default)]
    #[validate(range(min = 0, message = "Count must be zero or positive"))]
    #[schema(example = 2)]
    pub count: i32,
    #[validate(url(message = "Image must be a valid URL"))]
    #[schema(example = "https://www.themoviedb.org/t/p/w533_and_h300_bestv2/jBJWaqoSCiARWtfV0GlqHrcdidd.jpg")]
    pub image: String,
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            synopsis: movie.synopsis,
            score: movie.score,
            count: movie.count,
            image: movie.image,
        }
    }
}

impl From<MovieDto> for NewMovie {
    fn from(dto: MovieDto) -> Self {
        Self {
            title: dto.title,
            synopsis: dto.synopsis,
            image: dto.image,
        }
    }
}
