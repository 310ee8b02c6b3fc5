use crate::domain::error::DomainError;
use crate::domain::post::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    /// Newest first, at most `limit` rows.
    async fn find_recent(&self, limit: usize) -> Result<Vec<Post>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        let stored = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, content, created_at
            "#,
        )
        .bind(post.id)
        .bind(&post.author_id)
        .bind(&post.content)
        .bind(post.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %stored.id, author_id = %stored.author_id, "post created");
        Ok(stored)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Post>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::feed_service::FEED_LIMIT;
    use chrono::{Duration, SubsecRound, Utc};
    use uuid::Uuid;

    fn post_minutes_ago(author_id: &str, minutes: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: author_id.into(),
            content: format!("posted {minutes}m ago"),
            created_at: (Utc::now() - Duration::minutes(minutes)).trunc_subsecs(6),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn create_returns_the_stored_row(pool: PgPool) {
        let repo = PostgresPostRepository::new(pool);
        let post = Post::new("user_1".into(), "héllo 😀".into());

        let stored = repo.create(post.clone()).await.unwrap();
        assert_eq!(stored, post);

        let recent = repo.find_recent(10).await.unwrap();
        assert_eq!(recent, vec![post]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn find_recent_is_newest_first_and_limited(pool: PgPool) {
        let repo = PostgresPostRepository::new(pool);
        // inserted oldest first, the reverse of feed order
        for minutes in (0..(FEED_LIMIT as i64 + 5)).rev() {
            repo.create(post_minutes_ago("user_1", minutes)).await.unwrap();
        }

        let recent = repo.find_recent(FEED_LIMIT).await.unwrap();
        assert_eq!(recent.len(), FEED_LIMIT);
        assert!(recent.windows(2).all(|w| w[0].created_at > w[1].created_at));
        assert_eq!(recent[0].content, "posted 0m ago");
        assert_eq!(recent[FEED_LIMIT - 1].content, "posted 99m ago");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn rejects_duplicate_ids(pool: PgPool) {
        let repo = PostgresPostRepository::new(pool);
        let post = post_minutes_ago("user_1", 1);
        repo.create(post.clone()).await.unwrap();

        assert!(matches!(
            repo.create(post).await,
            Err(DomainError::Internal(_))
        ));
    }
}
