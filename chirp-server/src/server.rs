use std::net::SocketAddr;

use crate::application::feed_service::FeedService;
use crate::application::post_service::PostService;
use crate::chirp::posts_service_server::PostsServiceServer;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::security::SessionKeys;
use crate::presentation::grpc_service::ChirpGrpcService;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, SessionMiddleware, TimingMiddleware};
use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use tokio::signal;
use tonic::transport::Server;
use tracing::{info, warn};

/// Runs until the process receives Ctrl-C; actix stops its workers gracefully.
pub async fn start_rest_server(
    config: &AppConfig,
    feed_service: FeedService,
    post_service: PostService,
    keys: SessionKeys,
) -> anyhow::Result<()> {
    let cors_origins = config.cors_origins.clone();
    let bind_address = (config.host.as_str(), config.port);

    info!(host = bind_address.0, port = bind_address.1, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&cors_origins);

        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(web::Data::new(feed_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .service(
                web::scope("/api")
                    .wrap(SessionMiddleware::new(keys.clone()))
                    .configure(handlers::configure),
            )
    })
    .bind(bind_address)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}

pub async fn start_grpc_server(addr: SocketAddr, service: ChirpGrpcService) -> anyhow::Result<()> {
    info!(%addr, "gRPC server starting");

    Server::builder()
        .add_service(PostsServiceServer::new(service))
        .serve_with_shutdown(addr, async {
            if let Err(err) = signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for ctrl+c");
            }
            info!("gRPC server received shutdown signal");
        })
        .await?;

    Ok(())
}

fn build_cors(origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
