//! Movie catalog - browse movies, rate them, and keep per-movie aggregates.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Movies, scores, users and their DTO views
//! - **services**: Movie, score, user and authentication use cases
//! - **infra**: SeaORM stores, migrations and the Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **utils**: Security context for the request principal
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create an admin login
//! cargo run -- create-user --name Alex --username alex@gmail.com --password 123456789 --admin
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Movie, MovieDto, Password, Score, ScoreDto, User};
pub use errors::{AppError, AppResult};
