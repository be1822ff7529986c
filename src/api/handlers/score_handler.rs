//! Score submission handler.

use axum::{
    extract::State, middleware, response::Json, routing::put, Extension, Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, require_any_role, CurrentUser};
use crate::api::AppState;
use crate::config::{ROLE_ADMIN, ROLE_CLIENT};
use crate::domain::{MovieDto, ScoreDto};
use crate::errors::AppResult;

/// Create score routes (all authenticated)
pub fn score_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", put(save_score))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Score a movie as the logged-in user
#[utoipa::path(
    put,
    path = "/scores",
    tag = "Scores",
    request_body = ScoreDto,
    responses(
        (status = 200, description = "Score saved, movie with new aggregate", body = MovieDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Client or admin role required"),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_score(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ScoreDto>,
) -> AppResult<Json<MovieDto>> {
    require_any_role(&current_user, &[ROLE_CLIENT, ROLE_ADMIN])?;

    let movie = state.score_service.save_score(payload).await?;
    Ok(Json(movie))
}
