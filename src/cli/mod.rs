//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `create-user` - Add a login to the user store

pub mod args;

pub use args::{Cli, Commands};
