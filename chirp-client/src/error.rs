use serde::Deserialize;
use thiserror::Error;
use tonic::{Code, Status};

#[derive(Debug, Error)]
pub enum ChirpClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("gRPC error: {0}")]
    GrpcError(#[from] tonic::transport::Error),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Status error: {0}")]
    StatusError(Status),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ChirpClientError {
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        match status.as_u16() {
            401 => ChirpClientError::Unauthorized,
            400 => ChirpClientError::InvalidRequest(message),
            code => ChirpClientError::Server {
                status: code,
                message,
            },
        }
    }
}

impl From<Status> for ChirpClientError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::Unauthenticated => ChirpClientError::Unauthorized,
            Code::InvalidArgument => ChirpClientError::InvalidRequest(status.message().to_string()),
            _ => ChirpClientError::StatusError(status),
        }
    }
}
