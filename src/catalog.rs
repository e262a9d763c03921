use chrono::NaiveDate;

use crate::content_api::{ApiResult, ContentApi};
use crate::post::{Category, Post};
use crate::slug::category_slug;
use crate::text_utils::parse_day;

pub const RELATED_LIMIT: usize = 3;

pub fn find_category<'a>(categories: &'a [Category], slug: &str) -> Option<&'a Category> {
    categories.iter().find(|c| category_slug(&c.name) == slug)
}

/// Posts are joined to categories by name.
pub fn posts_in_category<'a>(posts: &'a [Post], category_name: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.category.name == category_name).collect()
}

/// Category named by `slug` with its posts, `None` when no category has
/// that slug. Posts are only fetched once the category is known.
pub async fn load_category<A: ContentApi>(api: &A, slug: &str) -> ApiResult<Option<(Category, Vec<Post>)>> {
    let categories = api.list_categories().await?;
    let Some(category) = find_category(&categories, slug).cloned() else {
        return Ok(None);
    };

    let posts = api.list_posts().await?;
    let category_posts = posts_in_category(&posts, &category.name).into_iter().cloned().collect();
    Ok(Some((category, category_posts)))
}

pub fn related_posts<'a>(posts: &'a [Post], current: &Post, limit: usize) -> Vec<&'a Post> {
    posts.iter()
        .filter(|p| p.category.name == current.category.name && p.id != current.id)
        .take(limit)
        .collect()
}

fn published_on(post: &Post, day: NaiveDate) -> bool {
    if post.created_at.is_some_and(|created| created.date_naive() == day) {
        return true;
    }
    post.date.as_deref().and_then(parse_day) == Some(day)
}

pub fn posts_published_on(posts: &[Post], day: NaiveDate) -> Vec<&Post> {
    posts.iter().filter(|p| published_on(p, day)).collect()
}

/// Case-insensitive match on title, excerpt and category name.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vec![];
    }

    posts.iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&query)
                || p.excerpt.to_lowercase().contains(&query)
                || p.category.name.to_lowercase().contains(&query)
        })
        .collect()
}
