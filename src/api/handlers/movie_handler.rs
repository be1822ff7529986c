//! Movie catalog handlers.

use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::MovieDto;
use crate::errors::AppResult;
use crate::types::{Created, MoviePage, NoContent, Page, PageRequest};

/// Title filter for the catalog listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleFilter {
    /// Case-insensitive substring of the title; empty matches all
    #[serde(default)]
    pub title: String,
}

/// Create movie routes; reads are public, writes need an admin token
pub fn movie_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(find_all))
        .route("/:id", get(find_by_id));

    let admin = Router::new()
        .route("/", post(insert))
        .route("/:id", put(update).delete(delete))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(admin)
}

/// Page through the catalog
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    params(TitleFilter, PageRequest),
    responses(
        (status = 200, description = "One page of movies", body = MoviePage),
        (status = 400, description = "Page index out of range")
    )
)]
pub async fn find_all(
    State(state): State<AppState>,
    Query(filter): Query<TitleFilter>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Page<MovieDto>>> {
    let movies = state
        .movie_service
        .find_all(&filter.title, page.checked()?)
        .await?;
    Ok(Json(movies))
}

/// Get a movie by id
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie found", body = MovieDto),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieDto>> {
    let movie = state.movie_service.find_by_id(id).await?;
    Ok(Json(movie))
}

/// Add a movie to the catalog (admin only)
#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    request_body = MovieDto,
    responses(
        (status = 201, description = "Movie created", body = MovieDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn insert(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<MovieDto>,
) -> AppResult<Created<MovieDto>> {
    require_admin(&current_user)?;

    let movie = state.movie_service.insert(payload).await?;
    Ok(Created(movie))
}

/// Replace a movie's title, synopsis and image (admin only)
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = MovieDto,
    responses(
        (status = 200, description = "Movie updated", body = MovieDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<MovieDto>,
) -> AppResult<Json<MovieDto>> {
    require_admin(&current_user)?;

    let movie = state.movie_service.update(id, payload).await?;
    Ok(Json(movie))
}

/// Remove a movie that has no scores (admin only)
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 400, description = "Movie still has scores"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Movie not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;

    state.movie_service.delete(id).await?;
    Ok(NoContent)
}
