//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Movie catalog - browse movies and rate them
#[derive(Parser, Debug)]
#[command(name = "movie-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Create a user with the client role, optionally an admin
    CreateUser(CreateUserArgs),
}

/// Arguments for the serve command; unset values come from the environment config
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the create-user command
#[derive(Parser, Debug)]
pub struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Login name
    #[arg(long)]
    pub username: String,

    /// Plain-text password, at least 8 characters
    #[arg(long, env = "CREATE_USER_PASSWORD")]
    pub password: String,

    /// Also grant the admin role
    #[arg(long)]
    pub admin: bool,
}
