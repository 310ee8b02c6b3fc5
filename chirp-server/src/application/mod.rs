pub mod feed_service;
pub mod post_service;
