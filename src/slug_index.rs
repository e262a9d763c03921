use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::post::Post;

/// Slug lookups over one fetched post list.
///
/// The first post in list order owns a slug. Slugs claimed by more than one
/// post are recorded as collisions.
pub struct SlugIndex<'a> {
    posts: &'a [Post],
    stored: HashMap<String, usize>,
    derived: HashMap<String, usize>,
    collisions: Vec<String>,
}

impl<'a> SlugIndex<'a> {
    pub fn build(posts: &'a [Post]) -> Self {
        let mut index = SlugIndex {
            posts,
            stored: Default::default(),
            derived: Default::default(),
            collisions: vec![],
        };

        for (pos, post) in posts.iter().enumerate() {
            if let Some(slug) = post.stored_slug() {
                index.insert_stored(slug.to_string(), pos);
            }
        }
        for (pos, post) in posts.iter().enumerate() {
            if let Some(slug) = post.derived_slug() {
                index.insert_derived(slug, pos);
            }
        }

        index
    }

    fn insert_stored(&mut self, slug: String, pos: usize) {
        match self.stored.entry(slug) {
            Entry::Occupied(e) => Self::note_collision(&mut self.collisions, e.key()),
            Entry::Vacant(e) => {
                e.insert(pos);
            }
        }
    }

    fn insert_derived(&mut self, slug: String, pos: usize) {
        // A title slug shadowed by another post's stored slug is a collision too
        if self.stored.get(&slug).is_some_and(|&owner| owner != pos) {
            Self::note_collision(&mut self.collisions, &slug);
        }
        match self.derived.entry(slug) {
            Entry::Occupied(e) => {
                if *e.get() != pos {
                    Self::note_collision(&mut self.collisions, e.key());
                }
            }
            Entry::Vacant(e) => {
                e.insert(pos);
            }
        }
    }

    fn note_collision(collisions: &mut Vec<String>, slug: &str) {
        if !collisions.iter().any(|s| s == slug) {
            collisions.push(slug.to_string());
        }
    }

    pub fn by_stored_slug(&self, slug: &str) -> Option<&'a Post> {
        self.stored.get(slug).map(|&pos| &self.posts[pos])
    }

    pub fn by_derived_slug(&self, slug: &str) -> Option<&'a Post> {
        self.derived.get(slug).map(|&pos| &self.posts[pos])
    }

    pub fn is_ambiguous(&self, slug: &str) -> bool {
        self.collisions.iter().any(|s| s == slug)
    }

    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::post;

    use super::*;

    #[test]
    fn test_happy_case() {
        let posts = vec![
            post("65a1f0c2e4b0a1b2c3d4e5f6", "Index Fund Investing", Some("index-funds-guide"), "Investing"),
            post("65a1f0c2e4b0a1b2c3d4e5f7", "High-Yield Savings!", None, "Saving Tips"),
        ];
        let index = SlugIndex::build(&posts);

        assert_eq!(index.by_stored_slug("index-funds-guide").map(|p| p.id.as_str()), Some("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(index.by_derived_slug("index-fund-investing").map(|p| p.id.as_str()), Some("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(index.by_derived_slug("high-yield-savings").map(|p| p.id.as_str()), Some("65a1f0c2e4b0a1b2c3d4e5f7"));
        assert!(index.by_stored_slug("high-yield-savings").is_none());
        assert!(index.collisions().is_empty());
    }

    #[test]
    fn test_first_post_wins_on_collision() {
        let posts = vec![
            post("000000000000000000000001", "Budget Basics", None, "Saving Tips"),
            post("000000000000000000000002", "Budget: Basics", None, "Saving Tips"),
            post("000000000000000000000003", "Other", Some("dup"), "Loans"),
            post("000000000000000000000004", "Another", Some("dup"), "Loans"),
        ];
        let index = SlugIndex::build(&posts);

        assert_eq!(index.by_derived_slug("budget-basics").map(|p| p.id.as_str()), Some("000000000000000000000001"));
        assert_eq!(index.by_stored_slug("dup").map(|p| p.id.as_str()), Some("000000000000000000000003"));
        assert!(index.is_ambiguous("budget-basics"));
        assert!(index.is_ambiguous("dup"));
        assert!(!index.is_ambiguous("other"));
    }

    #[test]
    fn test_stale_slug_against_edited_title() {
        let posts = vec![
            post("000000000000000000000001", "Saving Money Fast", Some("save-money"), "Saving Tips"),
            post("000000000000000000000002", "Save Money", None, "Saving Tips"),
        ];
        let index = SlugIndex::build(&posts);

        assert_eq!(index.by_stored_slug("save-money").map(|p| p.id.as_str()), Some("000000000000000000000001"));
        assert_eq!(index.by_derived_slug("save-money").map(|p| p.id.as_str()), Some("000000000000000000000002"));
        assert!(index.is_ambiguous("save-money"));
    }

    #[test]
    fn test_own_stored_slug_equal_to_title_slug() {
        let posts = vec![
            post("000000000000000000000001", "Save Money", Some("save-money"), "Saving Tips"),
        ];
        let index = SlugIndex::build(&posts);
        assert!(!index.is_ambiguous("save-money"));
    }
}
