use std::sync::Arc;

use tracing::{debug, error, instrument};

use crate::data::identity_directory::IdentityDirectory;
use crate::data::post_repository::PostRepository;
use crate::domain::author::AuthorView;
use crate::domain::error::DomainError;
use crate::domain::feed::{FeedEntry, compose_feed, distinct_author_ids};

pub const FEED_LIMIT: usize = 100;
pub const DIRECTORY_LIMIT: usize = 100;

/// Builds the public feed: recent posts joined with their authors.
#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    directory: Arc<dyn IdentityDirectory>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostRepository>, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { posts, directory }
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<FeedEntry>, DomainError> {
        let posts = self.posts.find_recent(FEED_LIMIT).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids = distinct_author_ids(&posts);
        let authors: Vec<AuthorView> = self
            .directory
            .get_user_list(&author_ids, DIRECTORY_LIMIT)
            .await?
            .into_iter()
            .map(AuthorView::from)
            .collect();

        debug!(
            posts = posts.len(),
            authors = authors.len(),
            "composing feed"
        );

        compose_feed(posts, authors).inspect_err(|err| {
            if let DomainError::AuthorNotFound(author_id) = err {
                error!(%author_id, "post author missing from identity directory");
            }
        })
    }
}
