//! Integration tests for API endpoints.
//!
//! The router runs against mocked services, so no database is needed.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use movie_catalog::api::{create_router, AppState};
use movie_catalog::config::{ROLE_ADMIN, ROLE_CLIENT};
use movie_catalog::errors::AppError;
use movie_catalog::services::{
    Claims, MockAuthService, MockMovieService, MockScoreService, Services, TokenResponse,
};
use movie_catalog::types::{Page, PageRequest};
use movie_catalog::utils::{SecurityContext, TaskLocalSecurityContext};

use common::movie_dto;

const ADMIN_TOKEN: &str = "admin-token";
const CLIENT_TOKEN: &str = "client-token";

/// Auth mock that knows one admin and one client token
fn auth() -> MockAuthService {
    let mut auth = MockAuthService::new();
    auth.expect_verify_token().returning(|token| {
        let (sub, authorities) = match token {
            ADMIN_TOKEN => ("alex@gmail.com", vec![ROLE_CLIENT, ROLE_ADMIN]),
            CLIENT_TOKEN => ("maria@gmail.com", vec![ROLE_CLIENT]),
            _ => return Err(AppError::Unauthorized),
        };
        Ok(Claims {
            sub: sub.to_string(),
            authorities: authorities.into_iter().map(String::from).collect(),
            exp: i64::MAX,
            iat: 0,
        })
    });
    auth
}

fn app(movies: MockMovieService, scores: MockScoreService, auth: MockAuthService) -> Router {
    let services = Services::new(
        Arc::new(movies),
        Arc::new(scores),
        Arc::new(auth),
    );
    create_router(AppState::new(&services, None))
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn new_movie_body() -> Value {
    json!({
        "title": "Bob Esponja",
        "synopsis": "Bob Esponja vai para a cidade",
        "image": "https://example.com/bob.jpg"
    })
}

#[tokio::test]
async fn test_root_is_public() {
    let app = app(MockMovieService::new(), MockScoreService::new(), auth());

    let response = app.oneshot(request(Method::GET, "/", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_without_database_is_degraded() {
    let app = app(MockMovieService::new(), MockScoreService::new(), auth());

    let response = app
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["status"], "degraded");
}

#[tokio::test]
async fn test_list_movies_passes_filter_and_page() {
    let mut movies = MockMovieService::new();
    movies
        .expect_find_all()
        .withf(|title: &str, page: &PageRequest| title == "bob" && *page == PageRequest::of(1, 5))
        .times(1)
        .returning(|_, page| Ok(Page::new(vec![movie_dto()], page, 6)));

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(Method::GET, "/movies?title=bob&page=1&size=5", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["content"][0]["title"], "Bob Esponja");
    assert_eq!(body["meta"]["total_pages"], 2);
}

#[tokio::test]
async fn test_list_movies_rejects_oversized_page() {
    let mut movies = MockMovieService::new();
    movies.expect_find_all().never();

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(
            Method::GET,
            "/movies?page=18446744073709551615",
            None,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_movies_defaults() {
    let mut movies = MockMovieService::new();
    movies
        .expect_find_all()
        .withf(|title: &str, page: &PageRequest| title.is_empty() && *page == PageRequest::default())
        .times(1)
        .returning(|_, page| Ok(Page::new(vec![], page, 0)));

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(Method::GET, "/movies", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_missing_movie_is_404() {
    let mut movies = MockMovieService::new();
    movies
        .expect_find_by_id()
        .returning(|_| Err(AppError::resource_not_found("Movie 99")));

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(Method::GET, "/movies/99", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_insert_requires_token() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().never();

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(Method::POST, "/movies", None, Some(new_movie_body())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_insert_rejects_client() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().never();

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(
            Method::POST,
            "/movies",
            Some(CLIENT_TOKEN),
            Some(new_movie_body()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_insert_as_admin_returns_201() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().times(1).returning(|mut dto| {
        dto.id = 10;
        Ok(dto)
    });

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(
            Method::POST,
            "/movies",
            Some(ADMIN_TOKEN),
            Some(new_movie_body()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["id"], 10);
}

#[tokio::test]
async fn test_insert_validates_body() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().never();

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(
            Method::POST,
            "/movies",
            Some(ADMIN_TOKEN),
            Some(json!({ "title": "Bob", "image": "not a url" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_token_is_401() {
    let app = app(MockMovieService::new(), MockScoreService::new(), auth());

    let response = app
        .oneshot(request(Method::DELETE, "/movies/1", Some("forged"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_as_admin_returns_204() {
    let mut movies = MockMovieService::new();
    movies
        .expect_delete()
        .with(mockall::predicate::eq(1))
        .times(1)
        .returning(|_| Ok(()));

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(Method::DELETE, "/movies/1", Some(ADMIN_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_scored_movie_is_400() {
    let mut movies = MockMovieService::new();
    movies
        .expect_delete()
        .returning(|_| Err(AppError::database("Referential integrity failure")));

    let app = app(movies, MockScoreService::new(), auth());
    let response = app
        .oneshot(request(Method::DELETE, "/movies/4", Some(ADMIN_TOKEN), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "Referential integrity failure"
    );
}

#[tokio::test]
async fn test_save_score_binds_principal() {
    let mut scores = MockScoreService::new();
    scores.expect_save_score().times(1).returning(|dto| {
        // The request principal is visible to services while the handler runs
        let username = TaskLocalSecurityContext.logged_username()?;
        assert_eq!(username, "maria@gmail.com");

        let mut movie = movie_dto();
        movie.id = dto.movie_id;
        movie.score = dto.score;
        movie.count = 1;
        Ok(movie)
    });

    let app = app(MockMovieService::new(), scores, auth());
    let response = app
        .oneshot(request(
            Method::PUT,
            "/scores",
            Some(CLIENT_TOKEN),
            Some(json!({ "movieId": 1, "score": 4.0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["score"], 4.0);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_save_score_out_of_range() {
    let mut scores = MockScoreService::new();
    scores.expect_save_score().never();

    let app = app(MockMovieService::new(), scores, auth());
    let response = app
        .oneshot(request(
            Method::PUT,
            "/scores",
            Some(CLIENT_TOKEN),
            Some(json!({ "movieId": 1, "score": 7.0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token() {
    let mut auth = auth();
    auth.expect_login()
        .withf(|username: &str, password: &str| username == "maria@gmail.com" && password == "123456789")
        .times(1)
        .returning(|_, _| {
            Ok(TokenResponse {
                access_token: CLIENT_TOKEN.to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 86400,
            })
        });

    let app = app(MockMovieService::new(), MockScoreService::new(), auth);
    let response = app
        .oneshot(request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "maria@gmail.com", "password": "123456789" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["access_token"], CLIENT_TOKEN);
}

#[tokio::test]
async fn test_login_bad_credentials_is_401() {
    let mut auth = auth();
    auth.expect_login()
        .returning(|_, _| Err(AppError::InvalidCredentials));

    let app = app(MockMovieService::new(), MockScoreService::new(), auth);
    let response = app
        .oneshot(request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "maria@gmail.com", "password": "wrong" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_CREDENTIALS");
}
