//! Access to the principal of the request being served.
//!
//! The authentication middleware binds the username from a verified token to
//! a Tokio task-local for as long as the request future runs. Services read
//! it through [`SecurityContext`] so tests can substitute a mock.

use std::future::Future;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::errors::{AppError, AppResult};

tokio::task_local! {
    static PRINCIPAL: String;
}

/// Reader for the currently logged-in username
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait SecurityContext: Send + Sync {
    /// Username of the current principal, or `Unauthenticated` when none is bound
    fn logged_username(&self) -> AppResult<String>;
}

/// Reads the principal bound by [`scope`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskLocalSecurityContext;

impl SecurityContext for TaskLocalSecurityContext {
    fn logged_username(&self) -> AppResult<String> {
        PRINCIPAL
            .try_with(Clone::clone)
            .map_err(|_| AppError::Unauthenticated("Invalid user".to_string()))
    }
}

/// Run `fut` with `username` bound as the current principal
pub async fn scope<F>(username: String, fut: F) -> F::Output
where
    F: Future,
{
    PRINCIPAL.scope(username, fut).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_bound_principal() {
        let username = scope("maria@gmail.com".to_string(), async {
            TaskLocalSecurityContext.logged_username()
        })
        .await
        .unwrap();

        assert_eq!(username, "maria@gmail.com");
    }

    #[tokio::test]
    async fn test_unbound_principal_is_unauthenticated() {
        let result = TaskLocalSecurityContext.logged_username();
        assert!(matches!(result, Err(AppError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn test_binding_ends_with_scope() {
        scope("bob@gmail.com".to_string(), async {}).await;
        assert!(TaskLocalSecurityContext.logged_username().is_err());
    }
}
