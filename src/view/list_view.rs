use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::page_range::{page_range, PageEntry};
use crate::paginator::{PaginationState, Paginator};
use crate::post::Post;

#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub path: String,
}

impl<'a> From<&'a Post> for PostSummary<'a> {
    fn from(post: &'a Post) -> Self {
        // Cards prefer the small variant
        let image = post.images.small.as_deref().or(post.images.main.as_deref());
        PostSummary {
            id: &post.id,
            title: &post.title,
            excerpt: &post.excerpt,
            category: &post.category.name,
            image,
            created_at: post.created_at,
            path: post.canonical_path(),
        }
    }
}

/// One page of a post list with the controls to move between pages.
#[derive(Debug, Serialize)]
pub struct PostPage<'a> {
    pub posts: Vec<PostSummary<'a>>,
    pub pagination: PaginationState,
    pub controls: Vec<PageEntry>,
}

impl<'a> PostPage<'a> {
    pub fn build(posts: &[&'a Post], cur_page: u32, page_size: u32, max_buttons: u32) -> Self {
        let paginator = Paginator::new(posts, page_size);
        let (items, pagination) = paginator.page(cur_page);
        let controls = page_range(pagination.cur_page, pagination.page_count, max_buttons);

        PostPage {
            posts: items.iter().map(|p| PostSummary::from(*p)).collect(),
            pagination,
            controls,
        }
    }
}
