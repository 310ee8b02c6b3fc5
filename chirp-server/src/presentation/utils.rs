use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::error::DomainError;
use crate::infrastructure::security::Claims;

/// Cookie the identity provider's frontend SDK stores the session JWT in.
pub const SESSION_COOKIE: &str = "__session";

/// Caller identity taken from a verified session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub session_id: Option<String>,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            session_id: claims.sid,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(DomainError::Unauthorized.into())),
        }
    }
}

/// Bearer header first, then the session cookie.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from);

    bearer.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}
