use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::infrastructure::config::SessionKeySource;

/// Verifies session tokens minted by the identity provider. This service
/// never issues tokens itself.
#[derive(Clone)]
pub struct SessionKeys {
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self::with_key(
            DecodingKey::from_secret(secret.as_bytes()),
            Algorithm::HS256,
        )
    }

    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self::with_key(
            DecodingKey::from_rsa_pem(pem)?,
            Algorithm::RS256,
        ))
    }

    pub fn from_source(source: &SessionKeySource) -> Result<Self, jsonwebtoken::errors::Error> {
        match source {
            SessionKeySource::Secret(secret) => Ok(Self::from_secret(secret)),
            SessionKeySource::PublicKeyPem(pem) => Self::from_rsa_pem(pem.as_bytes()),
        }
    }

    fn with_key(decoding: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        // provider session tokens may carry `aud`; no audience is configured
        validation.validate_aud = false;
        Self {
            decoding,
            validation,
        }
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity provider user id.
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}
