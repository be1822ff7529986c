//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE};
use crate::domain::MovieDto;
use crate::errors::{AppError, AppResult};

/// Page request (zero-based page index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page index, starting at 0
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page, capped at 100
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    pub fn of(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Reject page indexes whose row offset would overflow
    pub fn checked(self) -> AppResult<Self> {
        if self.page > MAX_PAGE_NUMBER {
            return Err(AppError::BadRequest(format!(
                "Page index must not exceed {}",
                MAX_PAGE_NUMBER
            )));
        }
        Ok(self)
    }

    /// Get limit capped at maximum; a zero size falls back to one item
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[aliases(MoviePage = Page<MovieDto>)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Create a page from its content and the total item count
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.limit();
        Self {
            content,
            meta: PageMeta {
                page: request.page,
                size,
                total_elements,
                total_pages: total_elements.div_ceil(size),
            },
        }
    }

    /// Convert every item, keeping the metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
