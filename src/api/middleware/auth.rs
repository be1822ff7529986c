//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_ADMIN};
use crate::errors::AppError;
use crate::utils::security_context;

/// Authenticated principal extracted from the JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
    pub authorities: Vec<String>,
}

impl CurrentUser {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.has_authority(ROLE_ADMIN)
    }
}

/// JWT authentication middleware.
///
/// Validates the bearer token, injects the [`CurrentUser`] into the request
/// extensions and binds the username as the security-context principal for
/// the rest of the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        username: claims.sub,
        authorities: claims.authorities,
    };
    let principal = current_user.username.clone();

    request.extensions_mut().insert(current_user);

    Ok(security_context::scope(principal, next.run(request)).await)
}

/// Require admin role, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require at least one of the given authorities.
pub fn require_any_role(user: &CurrentUser, authorities: &[&str]) -> Result<(), AppError> {
    if authorities.iter().any(|a| user.has_authority(a)) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
