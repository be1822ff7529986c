//! User service unit tests.

mod common;

use std::sync::Arc;

use movie_catalog::config::{ROLE_ADMIN, ROLE_CLIENT};
use movie_catalog::domain::User;
use movie_catalog::errors::{AppError, StoreError};
use movie_catalog::services::{UserManager, UserService};
use movie_catalog::utils::MockSecurityContext;

use common::{admin_projections, client_user, TestUnitOfWork};

fn logged_as(username: &'static str) -> MockSecurityContext {
    let mut security = MockSecurityContext::new();
    security
        .expect_logged_username()
        .returning(move || Ok(username.to_string()));
    security
}

fn service(uow: TestUnitOfWork, security: MockSecurityContext) -> UserManager<TestUnitOfWork> {
    UserManager::new(Arc::new(uow), Arc::new(security))
}

#[tokio::test]
async fn test_authenticated_returns_logged_user() {
    let mut uow = TestUnitOfWork::new();
    uow.users
        .expect_find_by_username()
        .withf(|username: &str| username == "maria@gmail.com")
        .times(1)
        .returning(|_| Ok(Some(client_user())));

    let user = service(uow, logged_as("maria@gmail.com"))
        .authenticated()
        .await
        .unwrap();

    assert_eq!(user.username, "maria@gmail.com");
}

#[tokio::test]
async fn test_authenticated_unknown_username() {
    let mut uow = TestUnitOfWork::new();
    uow.users.expect_find_by_username().returning(|_| Ok(None));

    let result = service(uow, logged_as("ghost@gmail.com")).authenticated().await;

    assert!(matches!(result, Err(AppError::Unauthenticated(_))));
}

#[tokio::test]
async fn test_authenticated_propagates_missing_principal() {
    let mut security = MockSecurityContext::new();
    security
        .expect_logged_username()
        .returning(|| Err(AppError::Unauthenticated("no principal bound".to_string())));

    let mut uow = TestUnitOfWork::new();
    uow.users.expect_find_by_username().never();

    let result = service(uow, security).authenticated().await;

    assert!(matches!(result, Err(AppError::Unauthenticated(ref msg)) if msg == "no principal bound"));
}

#[tokio::test]
async fn test_load_user_collects_roles() {
    let mut uow = TestUnitOfWork::new();
    uow.users
        .expect_search_user_and_roles_by_username()
        .withf(|username: &str| username == "alex@gmail.com")
        .times(1)
        .returning(|_| Ok(admin_projections()));

    let details = service(uow, MockSecurityContext::new())
        .load_user_by_username("alex@gmail.com")
        .await
        .unwrap();

    assert_eq!(details.username, "alex@gmail.com");
    assert_eq!(details.password_hash, "hash");
    assert_eq!(details.authorities(), vec![ROLE_CLIENT, ROLE_ADMIN]);
}

#[tokio::test]
async fn test_load_user_unknown_username() {
    let mut uow = TestUnitOfWork::new();
    uow.users
        .expect_search_user_and_roles_by_username()
        .returning(|_| Ok(vec![]));

    let result = service(uow, MockSecurityContext::new())
        .load_user_by_username("ghost@gmail.com")
        .await;

    assert!(matches!(result, Err(AppError::UserNotFound(_))));
}

#[tokio::test]
async fn test_create_user_hashes_password() {
    let mut uow = TestUnitOfWork::new();
    uow.users
        .expect_create()
        .withf(|u| u.password_hash.starts_with("$argon2") && u.password_hash != "123456789")
        .times(1)
        .returning(|u| {
            Ok(User {
                id: 7,
                name: u.name,
                username: u.username,
                password_hash: u.password_hash,
                roles: vec![],
            })
        });

    let user = service(uow, MockSecurityContext::new())
        .create_user(
            "Alex".to_string(),
            "alex@gmail.com".to_string(),
            "123456789".to_string(),
            vec![ROLE_CLIENT.to_string()],
        )
        .await
        .unwrap();

    assert_eq!(user.id, 7);
}

#[tokio::test]
async fn test_create_user_rejects_short_password() {
    let mut uow = TestUnitOfWork::new();
    uow.users.expect_create().never();

    let result = service(uow, MockSecurityContext::new())
        .create_user(
            "Alex".to_string(),
            "alex@gmail.com".to_string(),
            "short".to_string(),
            vec![ROLE_CLIENT.to_string()],
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let mut uow = TestUnitOfWork::new();
    uow.users
        .expect_create()
        .returning(|_| Err(StoreError::IntegrityViolation("users_username_key".to_string())));

    let result = service(uow, MockSecurityContext::new())
        .create_user(
            "Maria".to_string(),
            "maria@gmail.com".to_string(),
            "123456789".to_string(),
            vec![ROLE_CLIENT.to_string()],
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_create_user_rejects_unknown_authority() {
    let mut uow = TestUnitOfWork::new();
    uow.users.expect_create().never();

    let result = service(uow, MockSecurityContext::new())
        .create_user(
            "Alex".to_string(),
            "alex@gmail.com".to_string(),
            "123456789".to_string(),
            vec!["ROLE_OPERATOR".to_string()],
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}
