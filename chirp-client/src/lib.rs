use async_trait::async_trait;

mod error;
mod grpc_client;
mod http_client;
mod model;

pub mod chirp {
    tonic::include_proto!("chirp");
}

pub use error::ChirpClientError;
pub use grpc_client::ChirpClientGrpc;
pub use http_client::ChirpClientHttp;
pub use model::{Author, FeedEntry, MAX_CONTENT_CHARS, NewPost, Post};

/// Operations exposed by a chirp server, independent of transport.
#[async_trait]
pub trait ChirpClientTrait: Send {
    async fn get_all(&mut self) -> Result<Vec<FeedEntry>, ChirpClientError>;
    async fn create_post(&mut self, content: String) -> Result<Post, ChirpClientError>;
}
