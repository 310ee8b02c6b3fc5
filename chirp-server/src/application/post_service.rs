use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{NewPost, Post};
use tracing::instrument;
use validator::Validate;

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// `author_id` must come from the verified session, never from the payload.
    #[instrument(skip(self, content))]
    pub async fn create_post(&self, author_id: String, content: String) -> Result<Post, DomainError> {
        let new_post = NewPost::new(author_id, content);
        new_post.validate()?;
        self.repo.create(new_post.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryPostRepository;

    #[tokio::test]
    async fn stores_post_for_caller() {
        let repo = Arc::new(InMemoryPostRepository::default());
        let service = PostService::new(repo.clone());

        let post = service
            .create_post("u1".into(), "hello".into())
            .await
            .unwrap();

        assert_eq!(post.author_id, "u1");
        assert_eq!(post.content, "hello");
        assert_eq!(repo.stored(), vec![post]);
    }

    #[tokio::test]
    async fn rejects_invalid_content_before_touching_the_store() {
        let repo = Arc::new(InMemoryPostRepository::failing());
        let service = PostService::new(repo.clone());

        for content in [String::new(), "x".repeat(201)] {
            let err = service.create_post("u1".into(), content).await.unwrap_err();
            assert!(matches!(
                err,
                DomainError::Validation(ref msg) if msg == "content must be 1 to 200 characters"
            ));
        }
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn accepts_two_hundred_emoji() {
        let repo = Arc::new(InMemoryPostRepository::default());
        let content = "😀".repeat(200);

        let post = PostService::new(repo)
            .create_post("u1".into(), content.clone())
            .await
            .unwrap();
        assert_eq!(post.content, content);
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let repo = Arc::new(InMemoryPostRepository::failing());
        let err = PostService::new(repo)
            .create_post("u1".into(), "hello".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
