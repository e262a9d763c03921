use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::slug::slugify;

/// Reads an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// Image variants served with a post. None of them is required.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostImages {
    #[serde(default, rename = "image", skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, rename = "image_small", skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, rename = "image_medium", skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, rename = "image_large", skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, rename = "image_alt", skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A post as the content API returns it.
///
/// The stored `slug` may be missing, or stale if the title was edited after
/// the slug was assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Empty when the category was deleted upstream
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: CategoryRef,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(flatten)]
    pub images: PostImages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Post {
    /// Stored slug, ignoring empty strings.
    pub fn stored_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    /// Slug the title currently produces, if any.
    pub fn derived_slug(&self) -> Option<String> {
        Some(slugify(&self.title)).filter(|s| !s.is_empty())
    }

    /// Path segment used when linking to this post: the stored slug, else the
    /// title slug, else the raw id.
    pub fn canonical_segment(&self) -> String {
        if let Some(slug) = self.stored_slug() {
            return slug.to_string();
        }
        self.derived_slug().unwrap_or_else(|| self.id.clone())
    }

    pub fn canonical_path(&self) -> String {
        format!("/blog/{}", self.canonical_segment())
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, slug={}, category={}\ntitle={}",
               self.id,
               self.slug.as_deref().unwrap_or("-"),
               self.category.name,
               self.title
        )
    }
}
