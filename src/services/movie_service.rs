//! Movie service - catalog queries and admin writes.

use async_trait::async_trait;
use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::domain::{MovieDto, NewMovie};
use crate::errors::{AppError, AppResult, OptionExt, StoreError};
use crate::infra::UnitOfWork;
use crate::types::{Page, PageRequest};

/// Movie service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieService: Send + Sync {
    /// Page through movies whose title contains `title`, ignoring case.
    /// An empty filter matches every movie.
    async fn find_all(&self, title: &str, page: PageRequest) -> AppResult<Page<MovieDto>>;

    async fn find_by_id(&self, id: i64) -> AppResult<MovieDto>;

    async fn insert(&self, dto: MovieDto) -> AppResult<MovieDto>;

    async fn update(&self, id: i64, dto: MovieDto) -> AppResult<MovieDto>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of MovieService using Unit of Work.
pub struct MovieManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MovieManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn movie_not_found(id: i64) -> AppError {
    AppError::resource_not_found(format!("Movie {}", id))
}

#[async_trait]
impl<U: UnitOfWork> MovieService for MovieManager<U> {
    async fn find_all(&self, title: &str, page: PageRequest) -> AppResult<Page<MovieDto>> {
        tracing::debug!(title, page = page.page, size = page.size, "Searching movies");
        let page = page.checked()?;
        let title = title.to_owned();
        self.uow
            .read_only(move |ctx| {
                Box::pin(async move {
                    let movies = ctx.movies().search_by_title(&title, page).await?;
                    Ok::<_, AppError>(movies.map(MovieDto::from))
                })
            })
            .await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<MovieDto> {
        tracing::debug!(movie_id = id, "Loading movie");
        self.uow
            .read_only(move |ctx| {
                Box::pin(async move {
                    let movie = ctx
                        .movies()
                        .find_by_id(id)
                        .await?
                        .ok_or_not_found(&format!("Movie {}", id))?;
                    Ok::<_, AppError>(MovieDto::from(movie))
                })
            })
            .await
    }

    async fn insert(&self, dto: MovieDto) -> AppResult<MovieDto> {
        let draft = NewMovie::from(dto);
        let created = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let movie = ctx.movies().insert(draft).await?;
                    Ok::<_, AppError>(MovieDto::from(movie))
                })
            })
            .await?;

        tracing::info!(movie_id = created.id, "Movie created");
        Ok(created)
    }

    async fn update(&self, id: i64, dto: MovieDto) -> AppResult<MovieDto> {
        let draft = NewMovie::from(dto);
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut movie = match ctx.movies().get_reference_by_id(id).await {
                        Ok(movie) => movie,
                        Err(StoreError::EntityNotFound { .. }) => return Err(movie_not_found(id)),
                        Err(e) => return Err(e.into()),
                    };

                    movie.apply(draft);
                    let saved = ctx.movies().save(movie).await?;
                    Ok::<_, AppError>(MovieDto::from(saved))
                })
            })
            .await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    if !ctx.movies().exists_by_id(id).await? {
                        return Err(movie_not_found(id));
                    }

                    match ctx.movies().delete_by_id(id).await {
                        Ok(()) => Ok::<_, AppError>(()),
                        Err(StoreError::EntityNotFound { .. }) => Err(movie_not_found(id)),
                        Err(StoreError::IntegrityViolation(detail)) => {
                            tracing::warn!(movie_id = id, %detail, "Movie delete rejected");
                            Err(AppError::database("Referential integrity failure"))
                        }
                        Err(e) => Err(e.into()),
                    }
                })
            })
            .await?;

        tracing::info!(movie_id = id, "Movie deleted");
        Ok(())
    }
}
