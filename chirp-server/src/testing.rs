//! In-memory collaborators for service and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::data::identity_directory::IdentityDirectory;
use crate::data::post_repository::PostRepository;
use crate::domain::author::DirectoryUser;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::infrastructure::security::{Claims, SessionKeys};

pub const TEST_SECRET: &str = "test-session-secret";

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    fail: bool,
}

impl InMemoryPostRepository {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            posts: Mutex::default(),
            fail: true,
        }
    }

    pub fn stored(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        if self.fail {
            return Err(DomainError::Internal("database error: unavailable".into()));
        }
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Post>, DomainError> {
        if self.fail {
            return Err(DomainError::Internal("unavailable".into()));
        }
        let mut posts = self.stored();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        Ok(posts)
    }
}

pub struct StaticDirectory {
    users: Vec<DirectoryUser>,
    calls: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl StaticDirectory {
    pub fn new(users: Vec<DirectoryUser>) -> Self {
        Self {
            users,
            calls: Mutex::default(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Id batches received so far, one per lookup.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityDirectory for StaticDirectory {
    async fn get_user_list(
        &self,
        user_ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, DomainError> {
        self.calls.lock().unwrap().push(user_ids.to_vec());
        if self.fail {
            return Err(DomainError::Directory("connection refused".into()));
        }
        Ok(self
            .users
            .iter()
            .filter(|user| user_ids.contains(&user.id))
            .take(limit)
            .cloned()
            .collect())
    }
}

pub fn post_at(author_id: &str, content: &str, minutes_ago: i64) -> Post {
    Post {
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        ..Post::new(author_id.into(), content.into())
    }
}

pub fn directory_user(id: &str, first: &str, last: &str) -> DirectoryUser {
    DirectoryUser {
        id: id.into(),
        first_name: Some(first.into()),
        last_name: Some(last.into()),
        profile_image_url: Some(format!("https://img.example/{id}.png")),
        ..Default::default()
    }
}

pub fn session_keys() -> SessionKeys {
    SessionKeys::from_secret(TEST_SECRET)
}

pub fn session_token(user_id: &str, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + expires_in).timestamp() as usize,
        iat: Some(now.timestamp() as usize),
        sid: Some("sess_test".into()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}
