use crate::chirp::posts_service_client::PostsServiceClient;
use crate::chirp::{CreatePostRequest, GetAllRequest};
use crate::error::ChirpClientError;
use crate::{ChirpClientTrait, FeedEntry, NewPost, Post};
use async_trait::async_trait;
use tonic::Request;
use tonic::transport::Channel;

#[derive(Clone)]
pub struct ChirpClientGrpc {
    client: PostsServiceClient<Channel>,
    token: Option<String>,
}

impl ChirpClientGrpc {
    pub async fn connect(endpoint: &str, token: Option<String>) -> Result<Self, ChirpClientError> {
        let channel = Channel::from_shared(endpoint.to_owned())
            .map_err(|e| ChirpClientError::InvalidRequest(format!("invalid endpoint: {e}")))?
            .connect()
            .await?;
        Ok(Self {
            client: PostsServiceClient::new(channel),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn with_auth<T>(&self, mut req: Request<T>) -> Result<Request<T>, ChirpClientError> {
        let token = self.token.as_deref().ok_or(ChirpClientError::Unauthorized)?;
        let header = format!("Bearer {}", token.trim())
            .parse()
            .map_err(|_| ChirpClientError::Unauthorized)?;
        req.metadata_mut().insert("authorization", header);
        Ok(req)
    }
}

#[async_trait]
impl ChirpClientTrait for ChirpClientGrpc {
    async fn get_all(&mut self) -> Result<Vec<FeedEntry>, ChirpClientError> {
        let response = self.client.get_all(GetAllRequest {}).await?;

        response
            .into_inner()
            .entries
            .into_iter()
            .map(FeedEntry::try_from)
            .collect()
    }

    async fn create_post(&mut self, content: String) -> Result<Post, ChirpClientError> {
        let NewPost { content } = NewPost::new(content)?;
        let request = self.with_auth(Request::new(CreatePostRequest { content }))?;

        let response = self.client.create(request).await?;
        response.into_inner().try_into()
    }
}
