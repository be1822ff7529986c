//! Create-user command - Adds a login without going through HTTP.

use std::sync::Arc;

use crate::cli::args::CreateUserArgs;
use crate::config::{Config, ROLE_ADMIN, ROLE_CLIENT};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{UserManager, UserService};
use crate::utils::TaskLocalSecurityContext;

/// Authorities granted by the command
pub fn authorities_for(admin: bool) -> Vec<String> {
    let mut authorities = vec![ROLE_CLIENT.to_string()];
    if admin {
        authorities.push(ROLE_ADMIN.to_string());
    }
    authorities
}

/// Execute the create-user command
pub async fn execute(args: CreateUserArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let users = UserManager::new(
        Arc::new(Persistence::new(db.get_connection())),
        Arc::new(TaskLocalSecurityContext),
    );

    let user = users
        .create_user(
            args.name,
            args.username,
            args.password,
            authorities_for(args.admin),
        )
        .await?;

    let roles: Vec<&str> = user.roles.iter().map(|r| r.authority.as_str()).collect();
    println!("Created user {} ({}) with {}", user.username, user.id, roles.join(", "));

    Ok(())
}
