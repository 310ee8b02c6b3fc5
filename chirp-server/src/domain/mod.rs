pub mod author;
pub mod error;
pub mod feed;
pub mod post;
