use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::author::AuthorView;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub post: Post,
    pub author: AuthorView,
}

/// Distinct author ids in first-seen order.
pub fn distinct_author_ids(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(posts.len());
    posts
        .iter()
        .filter(|post| seen.insert(post.author_id.as_str()))
        .map(|post| post.author_id.clone())
        .collect()
}

/// Pairs every post with its author, keeping the post order. A single
/// unresolved author fails the whole feed.
pub fn compose_feed(
    posts: Vec<Post>,
    authors: Vec<AuthorView>,
) -> Result<Vec<FeedEntry>, DomainError> {
    let by_id: HashMap<String, AuthorView> = authors
        .into_iter()
        .map(|author| (author.id.clone(), author))
        .collect();

    posts
        .into_iter()
        .map(|post| {
            let author = by_id
                .get(&post.author_id)
                .cloned()
                .ok_or_else(|| DomainError::AuthorNotFound(post.author_id.clone()))?;
            Ok(FeedEntry { post, author })
        })
        .collect()
}
