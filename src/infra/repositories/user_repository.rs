//! User store: lookups by username, the credentials projection, and creation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    FromQueryResult, JoinType, ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{role, user, user_role};
use crate::domain::{NewUser, Role, User, UserDetailsProjection};
use crate::errors::{StoreError, StoreResult};

/// User store trait
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user and its roles by login name
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// One row per role held by the user; empty when the username is unknown
    async fn search_user_and_roles_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Vec<UserDetailsProjection>>;

    /// Create a user holding the given authorities
    async fn create(&self, user: NewUser) -> StoreResult<User>;
}

#[derive(Debug, FromQueryResult)]
struct UserRoleRow {
    username: String,
    password_hash: String,
    role_id: i64,
    authority: String,
}

impl From<UserRoleRow> for UserDetailsProjection {
    fn from(row: UserRoleRow) -> Self {
        UserDetailsProjection {
            username: row.username,
            password: row.password_hash,
            role_id: row.role_id,
            authority: row.authority,
        }
    }
}

/// SeaORM user store over any connection or transaction
pub struct UserStore<'c, C: ConnectionTrait> {
    db: &'c C,
}

impl<'c, C: ConnectionTrait> UserStore<'c, C> {
    pub fn new(db: &'c C) -> Self {
        Self { db }
    }
}

fn into_user(model: user::Model, roles: Vec<role::Model>) -> User {
    User {
        id: model.id,
        name: model.name,
        username: model.username,
        password_hash: model.password_hash,
        roles: roles.into_iter().map(Role::from).collect(),
    }
}

#[async_trait]
impl<'c, C> UserRepository for UserStore<'c, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let Some(model) = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = model
            .find_related(role::Entity)
            .order_by_asc(role::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some(into_user(model, roles)))
    }

    async fn search_user_and_roles_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Vec<UserDetailsProjection>> {
        let rows = user::Entity::find()
            .select_only()
            .column(user::Column::Username)
            .column(user::Column::PasswordHash)
            .column_as(role::Column::Id, "role_id")
            .column(role::Column::Authority)
            .join(JoinType::InnerJoin, user::Relation::UserRole.def())
            .join(JoinType::InnerJoin, user_role::Relation::Role.def())
            .filter(user::Column::Username.eq(username))
            .order_by_asc(role::Column::Id)
            .into_model::<UserRoleRow>()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(UserDetailsProjection::from).collect())
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let model = user::ActiveModel {
            id: NotSet,
            name: Set(new_user.name),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
        }
        .insert(self.db)
        .await?;

        let roles = role::Entity::find()
            .filter(role::Column::Authority.is_in(new_user.authorities.clone()))
            .order_by_asc(role::Column::Id)
            .all(self.db)
            .await?;

        if roles.len() != new_user.authorities.len() {
            return Err(StoreError::IntegrityViolation(format!(
                "unknown authority in {:?}",
                new_user.authorities
            )));
        }

        let links = roles.iter().map(|r| user_role::ActiveModel {
            user_id: Set(model.id),
            role_id: Set(r.id),
        });
        if !roles.is_empty() {
            user_role::Entity::insert_many(links)
                .exec_without_returning(self.db)
                .await?;
        }

        Ok(into_user(model, roles))
    }
}
