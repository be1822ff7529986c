//! Movie service unit tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use tokio_test::{assert_err, assert_ok};

use movie_catalog::errors::{AppError, StoreError};
use movie_catalog::services::{MovieManager, MovieService};
use movie_catalog::types::{Page, PageRequest};

use common::{movie, movie_dto, TestUnitOfWork};

const EXISTING_ID: i64 = 1;
const NON_EXISTING_ID: i64 = 1000;
const DEPENDENT_ID: i64 = 4;

fn service(uow: TestUnitOfWork) -> MovieManager<TestUnitOfWork> {
    MovieManager::new(Arc::new(uow))
}

#[tokio::test]
async fn test_find_all_searches_once_with_caller_arguments() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_search_by_title()
        .withf(|title: &str, page: &PageRequest| {
            title == "titulo" && *page == PageRequest::of(0, 10)
        })
        .times(1)
        .returning(|_, page| Ok(Page::new(vec![movie(EXISTING_ID)], page, 1)));

    let page = service(uow)
        .find_all("titulo", PageRequest::of(0, 10))
        .await
        .unwrap();

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id, EXISTING_ID);
    assert_eq!(page.meta.total_elements, 1);
}

#[tokio::test]
async fn test_find_all_rejects_page_beyond_offset_range() {
    // No store expectations: the query must never run
    let uow = TestUnitOfWork::new();

    let result = service(uow)
        .find_all("", PageRequest::of(u64::MAX, 20))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_find_by_id_existing() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_find_by_id()
        .with(eq(EXISTING_ID))
        .returning(|id| Ok(Some(movie(id))));

    let dto = service(uow).find_by_id(EXISTING_ID).await.unwrap();

    assert_eq!(dto.id, EXISTING_ID);
    assert_eq!(dto.title, "Bob Esponja");
}

#[tokio::test]
async fn test_find_by_id_non_existing() {
    let mut uow = TestUnitOfWork::new();
    uow.movies.expect_find_by_id().returning(|_| Ok(None));

    let result = service(uow).find_by_id(NON_EXISTING_ID).await;

    assert!(matches!(result, Err(AppError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_insert_ignores_derived_fields() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_insert()
        .withf(|draft| draft.title == "Bob Esponja")
        .times(1)
        .returning(|draft| Ok(draft.into_movie(10)));

    let mut dto = movie_dto();
    dto.score = 4.5;
    dto.count = 9;

    let created = service(uow).insert(dto).await.unwrap();

    assert_eq!(created.id, 10);
    assert_eq!(created.score, 0.0);
    assert_eq!(created.count, 0);
}

#[tokio::test]
async fn test_update_existing_keeps_aggregate() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_get_reference_by_id()
        .with(eq(EXISTING_ID))
        .returning(|id| {
            let mut m = movie(id);
            m.score = 3.5;
            m.count = 2;
            Ok(m)
        });
    uow.movies.expect_save().times(1).returning(Ok);

    let mut dto = movie_dto();
    dto.title = "Bob Esponja 2".to_string();

    let updated = service(uow).update(EXISTING_ID, dto).await.unwrap();

    assert_eq!(updated.id, EXISTING_ID);
    assert_eq!(updated.title, "Bob Esponja 2");
    assert_eq!(updated.score, 3.5);
    assert_eq!(updated.count, 2);
}

#[tokio::test]
async fn test_update_non_existing() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_get_reference_by_id()
        .returning(|id| Err(StoreError::not_found("Movie", id)));
    uow.movies.expect_save().never();

    let result = service(uow).update(NON_EXISTING_ID, movie_dto()).await;

    assert!(matches!(result, Err(AppError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_delete_existing() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_exists_by_id()
        .with(eq(EXISTING_ID))
        .times(1)
        .returning(|_| Ok(true));
    uow.movies
        .expect_delete_by_id()
        .with(eq(EXISTING_ID))
        .times(1)
        .returning(|_| Ok(()));

    assert_ok!(service(uow).delete(EXISTING_ID).await);
}

#[tokio::test]
async fn test_delete_non_existing() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_exists_by_id()
        .with(eq(NON_EXISTING_ID))
        .returning(|_| Ok(false));
    uow.movies.expect_delete_by_id().never();

    let result = service(uow).delete(NON_EXISTING_ID).await;

    assert!(matches!(result, Err(AppError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_delete_dependent() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_exists_by_id()
        .with(eq(DEPENDENT_ID))
        .times(1)
        .returning(|_| Ok(true));
    uow.movies
        .expect_delete_by_id()
        .with(eq(DEPENDENT_ID))
        .times(1)
        .returning(|_| {
            Err(StoreError::IntegrityViolation(
                "scores_movie_id_fkey".to_string(),
            ))
        });

    let result = service(uow).delete(DEPENDENT_ID).await;

    let err = assert_err!(result);
    assert!(matches!(err, AppError::Database(ref msg) if msg == "Referential integrity failure"));
}

#[tokio::test]
async fn test_store_failure_propagates_unchanged() {
    let mut uow = TestUnitOfWork::new();
    uow.movies
        .expect_find_by_id()
        .returning(|_| Err(StoreError::Db(sea_orm::DbErr::Custom("connection reset".into()))));

    let result = service(uow).find_by_id(EXISTING_ID).await;

    assert!(matches!(result, Err(AppError::Store(StoreError::Db(_)))));
}
