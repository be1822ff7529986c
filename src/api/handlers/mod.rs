//! HTTP request handlers.

pub mod auth_handler;
pub mod movie_handler;
pub mod score_handler;

pub use auth_handler::auth_routes;
pub use movie_handler::movie_routes;
pub use score_handler::score_routes;
