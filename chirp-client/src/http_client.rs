use crate::error::ChirpClientError;
use crate::{ChirpClientTrait, FeedEntry, NewPost, Post};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderValue};

#[derive(Clone)]
pub struct ChirpClientHttp {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ChirpClientHttp {
    pub fn connect(endpoint: &str, token: Option<String>) -> Result<Self, ChirpClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: endpoint.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn auth_header(&self) -> Result<HeaderValue, ChirpClientError> {
        let token = self.token.as_deref().ok_or(ChirpClientError::Unauthorized)?;
        HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| ChirpClientError::Unauthorized)
    }
}

#[async_trait]
impl ChirpClientTrait for ChirpClientHttp {
    async fn get_all(&mut self) -> Result<Vec<FeedEntry>, ChirpClientError> {
        let resp = self
            .client
            .get(format!("{}/api/posts", self.base_url))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(ChirpClientError::from_http_response(resp).await)
        }
    }

    async fn create_post(&mut self, content: String) -> Result<Post, ChirpClientError> {
        let new_post = NewPost::new(content)?;

        let resp = self
            .client
            .post(format!("{}/api/posts", self.base_url))
            .header(AUTHORIZATION, self.auth_header()?)
            .json(&new_post)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(ChirpClientError::from_http_response(resp).await)
        }
    }
}
