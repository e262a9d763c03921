use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use spdlog::{debug, warn};

use crate::config::Api;
use crate::content_api::{ApiError, ApiResult, ContentApi};
use crate::post::{Category, Post};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// [`ContentApi`] backed by the blog REST API.
pub struct RemoteContentApi {
    client: reqwest::Client,
    base_url: Url,
    slug_lookup: bool,
}

impl RemoteContentApi {
    pub fn new(api: &Api) -> ApiResult<Self> {
        let base_url = Url::parse(&api.base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", api.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(api.base_url.clone()));
        }

        let timeout = Duration::from_secs(api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Unavailable(format!("could not build HTTP client: {}", e)))?;

        Ok(RemoteContentApi {
            client,
            base_url,
            slug_lookup: api.slug_lookup,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments);
        debug!("GET {}", url);

        let response = self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", url, e);
                ApiError::Unavailable(format!("{}: {}", url, e))
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound(url.path().to_string())),
            status if !status.is_success() => {
                warn!("Request to {} returned HTTP {}", url, status);
                return Err(ApiError::Unavailable(format!("{}: HTTP {}", url, status)));
            }
            _ => {}
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Could not decode response from {}: {}", url, e);
            ApiError::Unavailable(format!("{}: {}", url, e))
        })
    }
}

#[async_trait]
impl ContentApi for RemoteContentApi {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.get_json(&["blogs"]).await
    }

    async fn post_by_id(&self, id: &str) -> ApiResult<Post> {
        self.get_json(&["blogs", id]).await
    }

    async fn post_by_slug(&self, slug: &str) -> ApiResult<Post> {
        if !self.slug_lookup {
            return Err(ApiError::Unsupported("post_by_slug"));
        }
        self.get_json(&["blogs", "slug", slug]).await
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get_json(&["categories"]).await
    }
}
