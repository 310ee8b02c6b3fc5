use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Upper bound on post length, counted in Unicode scalar values (`char`s),
/// the same unit Postgres uses for `VARCHAR(200)`. An emoji outside the BMP
/// counts once, not as two UTF-16 code units.
pub const MAX_CONTENT_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            content,
            // TIMESTAMPTZ keeps microseconds
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}

/// A post as submitted by a caller, before it is stored.
#[derive(Debug, Clone, Validate)]
pub struct NewPost {
    pub author_id: String,
    #[validate(length(min = 1, max = 200, message = "content must be 1 to 200 characters"))]
    pub content: String,
}

impl NewPost {
    pub fn new(author_id: String, content: String) -> Self {
        Self { author_id, content }
    }
}

impl From<NewPost> for Post {
    fn from(new_post: NewPost) -> Self {
        Post::new(new_post.author_id, new_post.content)
    }
}
