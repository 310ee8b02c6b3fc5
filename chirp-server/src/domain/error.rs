use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("Author not found")]
    AuthorNotFound(String),
    #[error("identity directory error: {0}")]
    Directory(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Coarse classification reported to callers next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "BAD_REQUEST",
            DomainError::Unauthorized => "UNAUTHORIZED",
            DomainError::AuthorNotFound(_)
            | DomainError::Directory(_)
            | DomainError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_values()
            .flatten()
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect();
        DomainError::Validation(messages.join("; "))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Directory(_) => StatusCode::BAD_GATEWAY,
            DomainError::AuthorNotFound(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::AuthorNotFound(author_id) => Some(json!({ "authorId": author_id })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            code: self.code(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_not_found_is_a_server_fault() {
        let err = DomainError::AuthorNotFound("user_2".into());
        assert_eq!(err.to_string(), "Author not found");
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.status_code().is_server_error());
    }

    #[test]
    fn validation_is_a_client_fault() {
        let err = DomainError::Validation("content must not be empty".into());
        assert_eq!(err.code(), "BAD_REQUEST");
        assert!(err.status_code().is_client_error());
        assert!(DomainError::Unauthorized.status_code().is_client_error());
    }

    #[test]
    fn directory_failures_map_to_bad_gateway() {
        let err = DomainError::Directory("timeout".into());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }
}
