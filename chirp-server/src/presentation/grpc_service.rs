use crate::application::feed_service::FeedService;
use crate::application::post_service::PostService;
use crate::chirp::posts_service_server::PostsService;
use crate::chirp::{
    Author as ProtoAuthor, CreatePostRequest, FeedEntry as ProtoFeedEntry, GetAllRequest,
    GetAllResponse, Post as ProtoPost,
};
use crate::domain::author::AuthorView;
use crate::domain::error::DomainError;
use crate::domain::feed::FeedEntry;
use crate::domain::post::Post;
use crate::infrastructure::security::SessionKeys;
use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use tonic::{Request, Response, Status};

#[derive(Clone)]
pub struct ChirpGrpcService {
    feed_service: FeedService,
    post_service: PostService,
    keys: SessionKeys,
}

impl ChirpGrpcService {
    pub fn new(feed_service: FeedService, post_service: PostService, keys: SessionKeys) -> Self {
        Self {
            feed_service,
            post_service,
            keys,
        }
    }

    fn authenticate<T>(&self, request: &Request<T>) -> Result<String, Status> {
        let token = extract_token_from_request(request)?;
        let claims = self
            .keys
            .verify_token(&token)
            .map_err(|_| Status::unauthenticated("Invalid or expired session"))?;
        Ok(claims.sub)
    }
}

#[tonic::async_trait]
impl PostsService for ChirpGrpcService {
    async fn get_all(
        &self,
        _request: Request<GetAllRequest>,
    ) -> Result<Response<GetAllResponse>, Status> {
        let entries = self
            .feed_service
            .get_all()
            .await
            .map_err(map_domain_error_to_status)?;

        Ok(Response::new(GetAllResponse {
            entries: entries.into_iter().map(Into::into).collect(),
        }))
    }

    async fn create(
        &self,
        request: Request<CreatePostRequest>,
    ) -> Result<Response<ProtoPost>, Status> {
        let user_id = self.authenticate(&request)?;
        let req = request.into_inner();

        let post = self
            .post_service
            .create_post(user_id, req.content)
            .await
            .map_err(map_domain_error_to_status)?;

        tracing::info!(author_id = %post.author_id, post_id = %post.id, "post created over gRPC");

        Ok(Response::new(post.into()))
    }
}

fn map_domain_error_to_status(err: DomainError) -> Status {
    match err {
        DomainError::Validation(msg) => Status::invalid_argument(msg),
        DomainError::Unauthorized => Status::unauthenticated("unauthorized"),
        DomainError::AuthorNotFound(_) => Status::internal("Author not found"),
        DomainError::Directory(msg) => Status::unavailable(msg),
        DomainError::Internal(msg) => Status::internal(msg),
    }
}

fn extract_token_from_request<T>(req: &Request<T>) -> Result<String, Status> {
    req.metadata()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Status::unauthenticated("Authorization header missing"))
        .and_then(|auth| {
            auth.strip_prefix("Bearer ")
                .ok_or_else(|| Status::unauthenticated("Invalid authorization header format"))
                .map(String::from)
        })
}

fn to_timestamp(at: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}

impl From<Post> for ProtoPost {
    fn from(p: Post) -> Self {
        ProtoPost {
            id: p.id.to_string(),
            author_id: p.author_id,
            content: p.content,
            created_at: Some(to_timestamp(p.created_at)),
        }
    }
}

impl From<AuthorView> for ProtoAuthor {
    fn from(a: AuthorView) -> Self {
        ProtoAuthor {
            id: a.id,
            name: a.name,
            profile_image_url: a.profile_image_url,
        }
    }
}

impl From<FeedEntry> for ProtoFeedEntry {
    fn from(entry: FeedEntry) -> Self {
        ProtoFeedEntry {
            post: Some(entry.post.into()),
            author: Some(entry.author.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        InMemoryPostRepository, StaticDirectory, directory_user, post_at, session_keys,
        session_token,
    };
    use std::sync::Arc;
    use tonic::Code;

    fn service(repo: Arc<InMemoryPostRepository>, dir: Arc<StaticDirectory>) -> ChirpGrpcService {
        ChirpGrpcService::new(
            FeedService::new(repo.clone(), dir),
            PostService::new(repo),
            session_keys(),
        )
    }

    fn authorized<T>(message: T, user_id: &str) -> Request<T> {
        let mut request = Request::new(message);
        let token = session_token(user_id, chrono::Duration::hours(1));
        request
            .metadata_mut()
            .insert("authorization", format!("Bearer {token}").parse().unwrap());
        request
    }

    #[tokio::test]
    async fn get_all_returns_entries_in_feed_order() {
        let repo = Arc::new(InMemoryPostRepository::with_posts(vec![
            post_at("u2", "older", 10),
            post_at("u1", "newer", 1),
        ]));
        let dir = Arc::new(StaticDirectory::new(vec![
            directory_user("u1", "A", "B"),
            directory_user("u2", "C", "D"),
        ]));

        let response = service(repo, dir)
            .get_all(Request::new(GetAllRequest {}))
            .await
            .unwrap()
            .into_inner();

        let names: Vec<String> = response
            .entries
            .into_iter()
            .map(|e| e.author.unwrap().name)
            .collect();
        assert_eq!(names, vec!["A B", "C D"]);
    }

    #[tokio::test]
    async fn get_all_maps_missing_author_to_internal() {
        let repo = Arc::new(InMemoryPostRepository::with_posts(vec![post_at("u2", "x", 1)]));
        let dir = Arc::new(StaticDirectory::new(Vec::new()));

        let status = service(repo, dir)
            .get_all(Request::new(GetAllRequest {}))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Author not found");
    }

    #[tokio::test]
    async fn create_requires_session_and_valid_content() {
        let repo = Arc::new(InMemoryPostRepository::default());
        let svc = service(repo.clone(), Arc::new(StaticDirectory::new(Vec::new())));

        let status = svc
            .create(Request::new(CreatePostRequest { content: "hi".into() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);

        let status = svc
            .create(authorized(CreatePostRequest { content: String::new() }, "u1"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(repo.stored().is_empty());

        let post = svc
            .create(authorized(CreatePostRequest { content: "hello".into() }, "u1"))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(post.author_id, "u1");
        assert_eq!(post.content, "hello");
        assert!(post.created_at.is_some());
        assert_eq!(repo.stored().len(), 1);
    }
}
