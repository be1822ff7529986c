//! Domain layer - Core business entities and logic
//!
//! Entities, their data transfer views, and value objects. Nothing in here
//! touches the database or HTTP.

pub mod movie;
pub mod password;
pub mod score;
pub mod user;

pub use movie::{Movie, MovieDto, NewMovie};
pub use password::Password;
pub use score::{Score, ScoreDto};
pub use user::{NewUser, Role, User, UserDetails, UserDetailsProjection};
