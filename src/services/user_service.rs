//! User service - resolves the logged-in user and loads credentials.

use async_trait::async_trait;
use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::is_valid_role;
use crate::domain::{NewUser, Password, User, UserDetails};
use crate::errors::{AppError, AppResult, StoreError};
use crate::infra::UnitOfWork;
use crate::utils::SecurityContext;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// The user behind the current request.
    ///
    /// A missing principal is reported by the security context and returned
    /// as is; a principal with no matching user is `Unauthenticated`.
    async fn authenticated(&self) -> AppResult<User>;

    /// Credentials and roles for a login name; `UserNotFound` when unknown.
    async fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails>;

    /// Create a user with the given authorities, hashing the password.
    async fn create_user(
        &self,
        name: String,
        username: String,
        password: String,
        authorities: Vec<String>,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    security: Arc<dyn SecurityContext>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, security: Arc<dyn SecurityContext>) -> Self {
        Self { uow, security }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn authenticated(&self) -> AppResult<User> {
        let username = self.security.logged_username()?;

        self.uow
            .read_only(move |ctx| {
                Box::pin(async move {
                    let user = ctx.users().find_by_username(&username).await?;
                    user.ok_or_else(|| AppError::Unauthenticated("Invalid user".to_string()))
                })
            })
            .await
    }

    async fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails> {
        tracing::debug!(username, "Loading credentials");
        let username = username.to_owned();
        let rows = self
            .uow
            .read_only(move |ctx| {
                Box::pin(async move {
                    let rows = ctx
                        .users()
                        .search_user_and_roles_by_username(&username)
                        .await?;
                    Ok::<_, AppError>(rows)
                })
            })
            .await?;

        UserDetails::from_projections(rows)
            .ok_or_else(|| AppError::UserNotFound("Email not found".to_string()))
    }

    async fn create_user(
        &self,
        name: String,
        username: String,
        password: String,
        authorities: Vec<String>,
    ) -> AppResult<User> {
        if let Some(unknown) = authorities.iter().find(|a| !is_valid_role(a)) {
            return Err(AppError::validation(format!("Unknown authority: {}", unknown)));
        }

        let password_hash = Password::new(&password)?.into_string();
        let new_user = NewUser {
            name,
            username,
            password_hash,
            authorities,
        };

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let username = new_user.username.clone();
                    match ctx.users().create(new_user).await {
                        Ok(user) => Ok(user),
                        Err(StoreError::IntegrityViolation(_)) => Err(AppError::BadRequest(
                            format!("Username {} is taken or a role is unknown", username),
                        )),
                        Err(e) => Err(e.into()),
                    }
                })
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }
}
