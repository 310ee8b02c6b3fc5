use actix_web::web;

use crate::domain::error::DomainError;

pub mod health;
pub mod post;

/// Registers the JSON API. Mounted under `/api` behind the session middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::health)
        .service(post::get_all)
        .service(post::create);
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| DomainError::Validation(err.to_string()).into())
}
