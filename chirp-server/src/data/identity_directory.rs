use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::domain::author::DirectoryUser;
use crate::domain::error::DomainError;

/// Batched user lookups against the identity provider.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn get_user_list(
        &self,
        user_ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, DomainError>;
}

/// Identity provider backend API (`GET /v1/users?user_id=..&limit=..`),
/// authenticated with the provider's secret key.
#[derive(Clone)]
pub struct HttpIdentityDirectory {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl HttpIdentityDirectory {
    pub fn new(
        base_url: &str,
        secret_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
        })
    }
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn get_user_list(
        &self,
        user_ids: &[String],
        limit: usize,
    ) -> Result<Vec<DirectoryUser>, DomainError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: Vec<(&str, String)> = user_ids
            .iter()
            .map(|id| ("user_id", id.clone()))
            .collect();
        query.push(("limit", limit.to_string()));

        let resp = self
            .client
            .get(format!("{}/v1/users", self.base_url))
            .bearer_auth(&self.secret_key)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                error!("identity directory request failed: {}", e);
                DomainError::Directory(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            error!(%status, "identity directory rejected user lookup");
            return Err(DomainError::Directory(format!(
                "user lookup returned {status}"
            )));
        }

        let users = resp.json::<Vec<DirectoryUser>>().await.map_err(|e| {
            error!("identity directory returned an unreadable body: {}", e);
            DomainError::Directory(e.to_string())
        })?;

        debug!(requested = user_ids.len(), resolved = users.len(), "users resolved");
        Ok(users)
    }
}
