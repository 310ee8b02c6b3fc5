use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::chirp;
use crate::error::ChirpClientError;

/// Counted in Unicode scalar values, like the server.
pub const MAX_CONTENT_CHARS: usize = 200;

/// Body of a create call. Validated locally so obviously bad input never
/// leaves the client.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, max = 200, message = "content must be 1 to 200 characters"))]
    pub content: String,
}

impl NewPost {
    pub fn new(content: String) -> Result<Self, ChirpClientError> {
        let new_post = Self { content };
        new_post
            .validate()
            .map_err(|e| ChirpClientError::InvalidRequest(e.to_string()))?;
        Ok(new_post)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    pub profile_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub post: Post,
    pub author: Author,
}

impl fmt::Display for FeedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} · {}\n  {}",
            self.author.name,
            self.post.created_at.format("%Y-%m-%d %H:%M UTC"),
            self.post.content
        )
    }
}

impl TryFrom<chirp::Post> for Post {
    type Error = ChirpClientError;

    fn try_from(p: chirp::Post) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&p.id)
            .map_err(|e| ChirpClientError::InvalidResponse(format!("post id: {e}")))?;
        let ts = p
            .created_at
            .ok_or_else(|| ChirpClientError::InvalidResponse("post without created_at".into()))?;
        let created_at = DateTime::from_timestamp(ts.seconds, ts.nanos.max(0) as u32)
            .ok_or_else(|| ChirpClientError::InvalidResponse("created_at out of range".into()))?;

        Ok(Post {
            id,
            author_id: p.author_id,
            content: p.content,
            created_at,
        })
    }
}

impl From<chirp::Author> for Author {
    fn from(a: chirp::Author) -> Self {
        Author {
            id: a.id,
            name: a.name,
            profile_image_url: a.profile_image_url,
        }
    }
}

impl TryFrom<chirp::FeedEntry> for FeedEntry {
    type Error = ChirpClientError;

    fn try_from(entry: chirp::FeedEntry) -> Result<Self, Self::Error> {
        let post = entry
            .post
            .ok_or_else(|| ChirpClientError::InvalidResponse("feed entry without post".into()))?;
        let author = entry
            .author
            .ok_or_else(|| ChirpClientError::InvalidResponse("feed entry without author".into()))?;
        Ok(FeedEntry {
            post: post.try_into()?,
            author: author.into(),
        })
    }
}
