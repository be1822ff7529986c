//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, movie_handler, score_handler};
use crate::domain::{MovieDto, ScoreDto};
use crate::services::TokenResponse;
use crate::types::{MoviePage, PageMeta};

/// OpenAPI documentation for the movie catalog
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Catalog API",
        version = "0.1.0",
        description = "Movie catalog with per-user ratings",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        movie_handler::find_all,
        movie_handler::find_by_id,
        movie_handler::insert,
        movie_handler::update,
        movie_handler::delete,
        score_handler::save_score,
    ),
    components(
        schemas(
            MovieDto,
            ScoreDto,
            MoviePage,
            PageMeta,
            auth_handler::LoginRequest,
            TokenResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Movies", description = "Catalog browsing and administration"),
        (name = "Scores", description = "Movie ratings")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
