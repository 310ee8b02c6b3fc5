pub mod identity_directory;
pub mod post_repository;
