use std::time::Duration;

use anyhow::{Context, anyhow};

/// How session tokens issued by the identity provider are verified.
#[derive(Debug, Clone)]
pub enum SessionKeySource {
    /// HS256 shared secret.
    Secret(String),
    /// RS256 public key, PEM encoded.
    PublicKeyPem(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub grpc_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub identity_api_url: String,
    pub identity_secret_key: String,
    pub identity_timeout: Duration,
    pub session_key: SessionKeySource,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

        let host = var("HOST", "127.0.0.1");
        let port = var("PORT", "8080")
            .parse()
            .context("invalid PORT")?;
        let grpc_port = var("GRPC_PORT", "50051")
            .parse()
            .context("invalid GRPC_PORT")?;
        let database_url = required("DATABASE_URL")?;
        let database_max_connections = var("DATABASE_MAX_CONNECTIONS", "20")
            .parse()
            .context("invalid DATABASE_MAX_CONNECTIONS")?;
        let identity_api_url = var("IDENTITY_API_URL", "https://api.clerk.com");
        let identity_secret_key = required("IDENTITY_SECRET_KEY")?;
        let identity_timeout = var("IDENTITY_TIMEOUT_SECS", "10")
            .parse()
            .map(Duration::from_secs)
            .context("invalid IDENTITY_TIMEOUT_SECS")?;

        let session_key = match (lookup("SESSION_JWT_PUBLIC_KEY"), lookup("SESSION_JWT_SECRET")) {
            // PEM keys are often stored on one line with escaped newlines
            (Some(pem), _) => SessionKeySource::PublicKeyPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => SessionKeySource::Secret(secret),
            (None, None) => {
                return Err(anyhow!(
                    "SESSION_JWT_PUBLIC_KEY or SESSION_JWT_SECRET must be set"
                ));
            }
        };

        let cors_origins = var("CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            grpc_port,
            database_url,
            database_max_connections,
            identity_api_url,
            identity_secret_key,
            identity_timeout,
            session_key,
            cors_origins,
        })
    }
}
