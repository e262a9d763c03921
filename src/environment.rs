use serde::Serialize;

use crate::post::Post;
use crate::text_utils::summarize;

const DESCRIPTION_LEN: usize = 160;

/// Document metadata for a rendered post (title, description, canonical link).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
    pub canonical_path: String,
}

impl DocumentMeta {
    pub fn for_post(post: &Post, site_name: &str) -> Self {
        let description = if post.excerpt.is_empty() {
            post.title.clone()
        } else {
            summarize(&post.excerpt, DESCRIPTION_LEN)
        };

        DocumentMeta {
            title: format!("{} | {}", post.title, site_name),
            description,
            canonical_path: post.canonical_path(),
        }
    }
}

/// What a page may ask of the client it is rendered for.
pub trait Environment {
    fn viewport_width(&self) -> Option<u32>;

    fn set_metadata(&mut self, meta: DocumentMeta);
}

/// Environment of a single HTTP request. Metadata is kept to be sent back
/// with the response.
#[derive(Debug, Default)]
pub struct RequestEnvironment {
    width: Option<u32>,
    meta: Option<DocumentMeta>,
}

impl RequestEnvironment {
    pub fn new(width: Option<u32>) -> Self {
        RequestEnvironment {
            width,
            meta: None,
        }
    }

    pub fn into_metadata(self) -> Option<DocumentMeta> {
        self.meta
    }
}

impl Environment for RequestEnvironment {
    fn viewport_width(&self) -> Option<u32> {
        self.width
    }

    fn set_metadata(&mut self, meta: DocumentMeta) {
        self.meta = Some(meta);
    }
}
