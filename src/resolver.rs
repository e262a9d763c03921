use std::borrow::Cow;

use serde::Serialize;
use spdlog::{debug, info, warn};
use thiserror::Error;

use crate::content_api::{ApiError, ApiResult, ContentApi};
use crate::navigation::NavigationToken;
use crate::post::Post;
use crate::slug::looks_like_store_id;
use crate::slug_index::SlugIndex;

/// Ways a path segment can be matched to a post, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    StoreId,
    SlugEndpoint,
    StoredSlug,
    DerivedSlug,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    Matched,
    Missed,
    /// The content API failed for a reason other than "not found".
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub strategy: Strategy,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub post: Post,
    pub strategy: Strategy,
    pub attempts: Vec<Attempt>,
    /// Another post in the same snapshot claims the same slug.
    pub ambiguous: bool,
    /// Post list the slug was matched against. `None` for single-post lookups.
    #[serde(skip)]
    pub snapshot: Option<Vec<Post>>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no post found for '{segment}'")]
    NotFound {
        segment: String,
        attempts: Vec<Attempt>,
    },

    #[error("resolution of '{0}' was superseded by a newer navigation")]
    Superseded(String),
}

impl From<&ApiError> for Outcome {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::NotFound(_) => Outcome::Missed,
            ApiError::Unsupported(_) => Outcome::Skipped,
            ApiError::Unavailable(desc) | ApiError::InvalidBaseUrl(desc) => Outcome::Failed(desc.clone()),
        }
    }
}

struct Trail<'s> {
    segment: &'s str,
    attempts: Vec<Attempt>,
}

impl<'s> Trail<'s> {
    fn record(&mut self, strategy: Strategy, outcome: Outcome) {
        debug!("Resolving '{}': {:?} -> {:?}", self.segment, strategy, outcome);
        if let Outcome::Failed(ref desc) = outcome {
            warn!("Resolving '{}': {:?} failed upstream: {}", self.segment, strategy, desc);
        }
        self.attempts.push(Attempt { strategy, outcome });
    }

    fn matched(mut self, strategy: Strategy, post: Post, ambiguous: bool, snapshot: Option<Vec<Post>>) -> Resolution {
        self.record(strategy, Outcome::Matched);
        debug!("Resolved '{}' to {}", self.segment, post);
        if ambiguous {
            warn!("Slug '{}' is claimed by more than one post. Using {}", self.segment, post.id);
        }
        Resolution {
            post,
            strategy,
            attempts: self.attempts,
            ambiguous,
            snapshot,
        }
    }

    fn not_found(self) -> ResolveError {
        info!("No post found for '{}'", self.segment);
        ResolveError::NotFound {
            segment: self.segment.to_string(),
            attempts: self.attempts,
        }
    }

    fn check(&self, token: &NavigationToken) -> Result<(), ResolveError> {
        if token.is_superseded() {
            debug!("Resolution of '{}' superseded", self.segment);
            return Err(ResolveError::Superseded(self.segment.to_string()));
        }
        Ok(())
    }
}

/// Maps a path segment to one post: store id first, then the slug endpoint,
/// then the stored and title slugs of the full post list.
///
/// Nothing is cached or retried. Every call fetches what it needs again.
pub struct PostResolver<A> {
    api: A,
}

impl<A: ContentApi> PostResolver<A> {
    pub fn new(api: A) -> Self {
        PostResolver { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn resolve(&self, segment: &str, token: &NavigationToken) -> Result<Resolution, ResolveError> {
        let mut trail = Trail { segment, attempts: vec![] };
        if segment.is_empty() {
            return Err(trail.not_found());
        }

        if looks_like_store_id(segment) {
            trail.check(token)?;
            let found = self.api.post_by_id(segment).await;
            trail.check(token)?;
            match found {
                Ok(post) => return Ok(trail.matched(Strategy::StoreId, post, false, None)),
                Err(e) => trail.record(Strategy::StoreId, Outcome::from(&e)),
            }
        } else {
            trail.record(Strategy::StoreId, Outcome::Skipped);
        }

        trail.check(token)?;
        let found = self.api.post_by_slug(segment).await;
        trail.check(token)?;
        match found {
            Ok(post) => return Ok(trail.matched(Strategy::SlugEndpoint, post, false, None)),
            Err(e) => trail.record(Strategy::SlugEndpoint, Outcome::from(&e)),
        }

        let posts = match self.api.list_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                trail.check(token)?;
                trail.record(Strategy::StoredSlug, Outcome::from(&e));
                trail.record(Strategy::DerivedSlug, Outcome::Skipped);
                return Err(trail.not_found());
            }
        };
        trail.check(token)?;

        let found = {
            let index = SlugIndex::build(&posts);
            let ambiguous = index.is_ambiguous(segment);

            if let Some(post) = index.by_stored_slug(segment) {
                Some((Strategy::StoredSlug, post.clone(), ambiguous))
            } else {
                trail.record(Strategy::StoredSlug, Outcome::Missed);
                index.by_derived_slug(segment)
                    .map(|post| (Strategy::DerivedSlug, post.clone(), ambiguous))
            }
        };

        match found {
            Some((strategy, post, ambiguous)) => Ok(trail.matched(strategy, post, ambiguous, Some(posts))),
            None => {
                trail.record(Strategy::DerivedSlug, Outcome::Missed);
                Err(trail.not_found())
            }
        }
    }

    /// Full post list around a resolved post, reusing the one fetched while
    /// resolving when there is one.
    pub async fn post_list<'r>(&self, resolution: &'r Resolution) -> ApiResult<Cow<'r, [Post]>> {
        match resolution.snapshot {
            Some(ref posts) => Ok(Cow::Borrowed(posts.as_slice())),
            None => self.api.list_posts().await.map(Cow::Owned),
        }
    }
}
