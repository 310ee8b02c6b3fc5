mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod testing;

pub mod chirp {
    tonic::include_proto!("chirp");
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use application::feed_service::FeedService;
use application::post_service::PostService;
use data::identity_directory::{HttpIdentityDirectory, IdentityDirectory};
use data::post_repository::{PostRepository, PostgresPostRepository};
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::security::SessionKeys;
use presentation::grpc_service::ChirpGrpcService;
use server::{start_grpc_server, start_rest_server};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let post_repo: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
    let directory: Arc<dyn IdentityDirectory> = Arc::new(
        HttpIdentityDirectory::new(
            &config.identity_api_url,
            config.identity_secret_key.clone(),
            config.identity_timeout,
        )
        .context("failed to build identity directory client")?,
    );
    let keys = SessionKeys::from_source(&config.session_key).context("invalid session key")?;

    let feed_service = FeedService::new(Arc::clone(&post_repo), directory);
    let post_service = PostService::new(post_repo);

    let grpc_addr: SocketAddr = format!("{}:{}", config.host, config.grpc_port)
        .parse()
        .context("invalid gRPC bind address")?;
    let grpc_service =
        ChirpGrpcService::new(feed_service.clone(), post_service.clone(), keys.clone());

    let result = tokio::try_join!(
        start_rest_server(&config, feed_service, post_service, keys),
        start_grpc_server(grpc_addr, grpc_service),
    );

    pool.close().await;
    info!("shutdown complete");

    result.map(|_| ())
}
