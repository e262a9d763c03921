use async_trait::async_trait;
use thiserror::Error;

use crate::post::{Category, Post};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("content API unavailable: {0}")]
    Unavailable(String),

    #[error("operation not supported by this deployment: {0}")]
    Unsupported(&'static str),

    #[error("invalid API base url {0}")]
    InvalidBaseUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only view of the remote blog store.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn list_posts(&self) -> ApiResult<Vec<Post>>;

    async fn post_by_id(&self, id: &str) -> ApiResult<Post>;

    /// Not every deployment exposes slug lookups. Those return
    /// [`ApiError::Unsupported`].
    async fn post_by_slug(&self, slug: &str) -> ApiResult<Post>;

    async fn list_categories(&self) -> ApiResult<Vec<Category>>;
}
