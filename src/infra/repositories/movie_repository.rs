//! Movie store: title search, lookups, and writes against the `movies` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::{Expr, Func, LikeExpr};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::movie::{self, ActiveModel, Entity as MovieEntity};
use crate::domain::{Movie, NewMovie};
use crate::errors::{StoreError, StoreResult};
use crate::types::{Page, PageRequest};

const ENTITY: &str = "Movie";

const LIKE_ESCAPE: char = '\\';

/// Lowercased `%title%` pattern with LIKE metacharacters escaped,
/// so the filter is a literal substring match
fn title_pattern(title: &str) -> String {
    let mut pattern = String::with_capacity(title.len() + 2);
    pattern.push('%');
    for c in title.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Movie store trait
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Case-insensitive substring search on title, ordered by id
    async fn search_by_title(&self, title: &str, page: PageRequest) -> StoreResult<Page<Movie>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Movie>>;

    /// Fetch by id, signalling `EntityNotFound` when absent
    async fn get_reference_by_id(&self, id: i64) -> StoreResult<Movie>;

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Insert a new movie, returning it with its generated id
    async fn insert(&self, movie: NewMovie) -> StoreResult<Movie>;

    /// Overwrite an existing movie
    async fn save(&self, movie: Movie) -> StoreResult<Movie>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

/// SeaORM movie store over any connection or transaction
pub struct MovieStore<'c, C: ConnectionTrait> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> MovieStore<'c, C> {
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'c, C> MovieRepository for MovieStore<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn search_by_title(&self, title: &str, page: PageRequest) -> StoreResult<Page<Movie>> {
        let pattern = LikeExpr::new(title_pattern(title)).escape(LIKE_ESCAPE);
        let paginator = MovieEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(movie::Column::Title))).like(pattern))
            .order_by_asc(movie::Column::Id)
            .paginate(self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page::new(
            models.into_iter().map(Movie::from).collect(),
            page,
            total,
        ))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Movie>> {
        let model = MovieEntity::find_by_id(id).one(self.db).await?;
        Ok(model.map(Movie::from))
    }

    async fn get_reference_by_id(&self, id: i64) -> StoreResult<Movie> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let count = MovieEntity::find_by_id(id).count(self.db).await?;
        Ok(count > 0)
    }

    async fn insert(&self, movie: NewMovie) -> StoreResult<Movie> {
        let fresh = movie.into_movie(0);
        let active = ActiveModel {
            id: NotSet,
            title: Set(fresh.title),
            synopsis: Set(fresh.synopsis),
            score: Set(fresh.score),
            count: Set(fresh.count),
            image: Set(fresh.image),
        };

        let model = active.insert(self.db).await?;
        Ok(Movie::from(model))
    }

    async fn save(&self, movie: Movie) -> StoreResult<Movie> {
        let id = movie.id;
        let active = ActiveModel {
            id: Set(movie.id),
            title: Set(movie.title),
            synopsis: Set(movie.synopsis),
            score: Set(movie.score),
            count: Set(movie.count),
            image: Set(movie.image),
        };

        match active.update(self.db).await {
            Ok(model) => Ok(Movie::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(StoreError::not_found(ENTITY, id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = MovieEntity::delete_by_id(id).exec(self.db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}
