#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::content_api::{ApiError, ApiResult, ContentApi};
use crate::post::{Category, CategoryRef, Post, PostImages};

pub const POSTS_JSON: &str = r#"[
  {
    "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
    "title": "The Complete Guide to Index Fund Investing in 2024",
    "slug": "index-funds-guide",
    "category": { "name": "Investing" },
    "createdAt": "2024-01-20T09:30:00.000Z",
    "excerpt": "Index funds are the simplest way to invest.",
    "image": "https://img.example.com/index.jpg",
    "image_small": "https://img.example.com/index-small.jpg",
    "author": { "name": "Jane" }
  },
  {
    "_id": "65a1f0c2e4b0a1b2c3d4e5f7",
    "title": "High-Yield Savings!",
    "category": { "name": "Saving Tips" },
    "date": "2024-01-21"
  },
  {
    "_id": "65a1f0c2e4b0a1b2c3d4e5f8",
    "title": "Credit Card Rewards Explained",
    "slug": "",
    "category": { "name": "Credit Cards" },
    "excerpt": "Points, miles and cash back."
  }
]"#;

/// Fields the API sends as `null` instead of leaving them out.
pub const POSTS_WITH_NULLS_JSON: &str = r#"[
  {
    "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
    "title": "Index Funds",
    "slug": "index-funds",
    "category": { "name": "Investing" },
    "excerpt": null,
    "author": null
  },
  {
    "_id": "65a1f0c2e4b0a1b2c3d4e5f9",
    "title": "Orphaned Post",
    "slug": null,
    "category": null,
    "createdAt": null,
    "image": null
  }
]"#;

pub fn post(id: &str, title: &str, slug: Option<&str>, category: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.map(str::to_string),
        category: CategoryRef { name: category.to_string() },
        created_at: None,
        date: None,
        excerpt: String::new(),
        author: None,
        images: PostImages::default(),
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("All about {}", name),
    }
}

/// In-memory [`ContentApi`] that counts calls and can be made to fail.
#[derive(Default)]
pub struct FakeContentApi {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub slug_lookup: bool,
    pub fail_list: bool,
    pub fail_by_id: bool,
    pub list_calls: AtomicUsize,
    pub by_id_calls: AtomicUsize,
    pub by_slug_calls: AtomicUsize,
    pub log: Mutex<Vec<String>>,
}

impl FakeContentApi {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        FakeContentApi {
            posts,
            ..Default::default()
        }
    }

    fn record(&self, call: String) {
        if let Ok(mut log) = self.log.lock() {
            log.push(call);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.record("list_posts".to_string());
        if self.fail_list {
            return Err(ApiError::Unavailable("list down".to_string()));
        }
        Ok(self.posts.clone())
    }

    async fn post_by_id(&self, id: &str) -> ApiResult<Post> {
        self.by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.record(format!("post_by_id:{}", id));
        if self.fail_by_id {
            return Err(ApiError::Unavailable("HTTP 500".to_string()));
        }
        self.posts.iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn post_by_slug(&self, slug: &str) -> ApiResult<Post> {
        if !self.slug_lookup {
            return Err(ApiError::Unsupported("post_by_slug"));
        }
        self.by_slug_calls.fetch_add(1, Ordering::SeqCst);
        self.record(format!("post_by_slug:{}", slug));
        self.posts.iter()
            .find(|p| p.stored_slug() == Some(slug))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(slug.to_string()))
    }

    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.record("list_categories".to_string());
        Ok(self.categories.clone())
    }
}
