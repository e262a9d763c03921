use serde::Serialize;

use crate::environment::DocumentMeta;
use crate::post::{Category, Post};
use crate::resolver::{Attempt, Resolution, Strategy};
use crate::slug::category_slug;
use crate::view::list_view::PostSummary;

/// A resolved post with what the page needs around it.
#[derive(Debug, Serialize)]
pub struct PostView<'a> {
    pub post: &'a Post,
    pub canonical_path: String,
    pub strategy: Strategy,
    pub attempts: &'a [Attempt],
    pub ambiguous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
    pub related: Vec<PostSummary<'a>>,
}

impl<'a> PostView<'a> {
    pub fn new(resolution: &'a Resolution, meta: Option<DocumentMeta>, related: &[&'a Post]) -> Self {
        PostView {
            post: &resolution.post,
            canonical_path: resolution.post.canonical_path(),
            strategy: resolution.strategy,
            attempts: &resolution.attempts,
            ambiguous: resolution.ambiguous,
            meta,
            related: related.iter().map(|p| PostSummary::from(*p)).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub slug: String,
    pub path: String,
}

impl<'a> From<&'a Category> for CategoryView<'a> {
    fn from(category: &'a Category) -> Self {
        let slug = category_slug(&category.name);
        CategoryView {
            id: &category.id,
            name: &category.name,
            description: &category.description,
            path: format!("/category/{}", slug),
            slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: String,
    #[serde(skip_serializing_if = "<[Attempt]>::is_empty")]
    pub attempts: &'a [Attempt],
}

impl ErrorBody<'static> {
    pub fn new(error: String) -> Self {
        ErrorBody {
            error,
            attempts: &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::resolver::Outcome;
    use crate::test_data::{category, post};

    use super::*;

    #[test]
    fn test_post_view_json() {
        let resolution = Resolution {
            post: post("65a1f0c2e4b0a1b2c3d4e5f7", "High-Yield Savings!", None, "Saving Tips"),
            strategy: Strategy::DerivedSlug,
            attempts: vec![
                Attempt { strategy: Strategy::StoreId, outcome: Outcome::Skipped },
                Attempt { strategy: Strategy::StoredSlug, outcome: Outcome::Failed("HTTP 502".to_string()) },
                Attempt { strategy: Strategy::DerivedSlug, outcome: Outcome::Matched },
            ],
            ambiguous: false,
            snapshot: None,
        };
        let other = post("65a1f0c2e4b0a1b2c3d4e5f9", "Emergency Funds", Some("emergency-funds"), "Saving Tips");

        let view = PostView::new(&resolution, None, &[&other]);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["canonical_path"], "/blog/high-yield-savings");
        assert_eq!(json["strategy"], "derived_slug");
        assert_eq!(json["post"]["_id"], "65a1f0c2e4b0a1b2c3d4e5f7");
        assert_eq!(json["attempts"][0], serde_json::json!({ "strategy": "store_id", "outcome": "skipped" }));
        assert_eq!(json["attempts"][1], serde_json::json!({ "strategy": "stored_slug", "outcome": "failed", "detail": "HTTP 502" }));
        assert_eq!(json["related"][0]["path"], "/blog/emergency-funds");
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn test_category_view() {
        let c = category("c1", "Personal Finance");
        let view = CategoryView::from(&c);
        assert_eq!(view.slug, "personal-finance");
        assert_eq!(view.path, "/category/personal-finance");
    }

    #[test]
    fn test_error_body_json() {
        let json = serde_json::to_value(ErrorBody::new("boom".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }
}
