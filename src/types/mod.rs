//! Shared types used across layers.

mod pagination;
mod response;

pub use pagination::{MoviePage, Page, PageMeta, PageRequest};
pub use response::{Created, NoContent};
