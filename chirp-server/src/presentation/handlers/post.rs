use crate::application::feed_service::FeedService;
use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::presentation::dto::CreatePostRequest;
use crate::presentation::middleware::RequestId;
use crate::presentation::utils::AuthenticatedUser;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, routes, web};
use tracing::info;

#[routes]
#[get("/posts")]
#[get("/trpc/posts.getAll")]
pub async fn get_all(
    req: HttpRequest,
    feed: web::Data<FeedService>,
) -> Result<HttpResponse, DomainError> {
    let entries = feed.get_all().await?;

    info!(
        request_id = %request_id(&req),
        entries = entries.len(),
        "feed retrieved"
    );

    Ok(HttpResponse::Ok().json(entries))
}

#[routes]
#[post("/posts")]
#[post("/trpc/posts.create")]
pub async fn create(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<PostService>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let post = posts
        .create_post(user.id.clone(), payload.into_inner().content)
        .await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        session_id = user.session_id.as_deref().unwrap_or("-"),
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(post))
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
