//! Post CRUD, search, and presentation handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use base64::{Engine as _, engine::general_purpose};

use quill_core::PostService;
use quill_core::domain::{Post, PostFilter, Variant};
use quill_core::ports::BlobStorage;
use quill_core::service::DEFAULT_TOC_DEPTH;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    CoverImageUpload, CreatePostRequest, ListPostsQuery, PostResponse, RenderedPostResponse,
    SearchQuery, TocQuery, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut post = Post::new(
        req.title,
        req.summary,
        req.content,
        req.topic,
        req.author_name,
        req.author_email,
    );
    post.featured = req.featured;
    post.published = req.published;

    let mut stored_key = None;
    if let Some(upload) = req.cover_image {
        stored_key = Some(attach_upload(&state.posts, &mut post, upload).await?);
    }

    let saved = save_or_discard(&state.posts, post, stored_key.as_deref()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(&state.posts, &saved))))
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostFilter {
        featured: query.featured,
        published: query.published,
        topic: query.topic,
        author_name: query.author,
    };

    let posts = state.posts.list(&filter).await?;
    let body: Vec<PostResponse> = posts.iter().map(|p| post_response(&state.posts, p)).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/search?q=
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search(&query.q).await?;
    let body: Vec<PostResponse> = posts.iter().map(|p| post_response(&state.posts, p)).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/{id_or_slug}
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&state.posts, &post))))
}

/// PUT /api/posts/{id_or_slug}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut post = state.posts.find(&path).await?;

    if let Some(title) = req.title {
        post.title = title;
    }
    if let Some(summary) = req.summary {
        post.summary = summary;
    }
    if let Some(content) = req.content {
        post.content = content;
    }
    if let Some(topic) = req.topic {
        post.topic = topic;
    }
    if let Some(author_name) = req.author_name {
        post.author_name = author_name;
    }
    if let Some(author_email) = req.author_email {
        post.author_email = author_email;
    }
    if let Some(featured) = req.featured {
        post.featured = featured;
    }
    if let Some(published) = req.published {
        post.published = published;
    }
    let mut stored_key = None;
    if let Some(upload) = req.cover_image {
        stored_key = Some(attach_upload(&state.posts, &mut post, upload).await?);
    }

    let saved = save_or_discard(&state.posts, post, stored_key.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&state.posts, &saved))))
}

/// DELETE /api/posts/{id_or_slug}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find(&path).await?;
    state.posts.delete(post.id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id_or_slug}/cover-image
pub async fn upload_cover_image(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CoverImageUpload>,
) -> AppResult<HttpResponse> {
    let mut post = state.posts.find(&path).await?;
    let key = attach_upload(&state.posts, &mut post, body.into_inner()).await?;

    let saved = save_or_discard(&state.posts, post, Some(&key)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(&state.posts, &saved))))
}

/// GET /api/posts/{id_or_slug}/html
///
/// Query parameters become the render context, so `?name=Ada` fills a
/// `{{name}}` placeholder in the content.
pub async fn html(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find(&path).await?;
    let html = state.posts.render(&post, &query.into_inner());
    Ok(HttpResponse::Ok().json(ApiResponse::ok(RenderedPostResponse {
        id: post.id.to_string(),
        html,
    })))
}

/// GET /api/posts/{id_or_slug}/toc?depth=
pub async fn toc(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<TocQuery>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find(&path).await?;
    let depth = query.depth.unwrap_or(DEFAULT_TOC_DEPTH);
    Ok(HttpResponse::Ok().json(ApiResponse::ok(state.posts.render_toc(&post, depth))))
}

/// Persist a post, discarding a freshly stored blob when the save is
/// rejected so a failed request leaves nothing behind in storage.
async fn save_or_discard(
    service: &PostService,
    post: Post,
    stored_key: Option<&str>,
) -> AppResult<Post> {
    match service.save(post).await {
        Ok(saved) => Ok(saved),
        Err(err) => {
            if let Some(key) = stored_key {
                if let Err(cleanup) = service.storage().delete(key).await {
                    tracing::warn!(%key, %cleanup, "Failed to discard blob of rejected save");
                }
            }
            Err(err.into())
        }
    }
}

/// Decode a base64 upload, store the blob, attach it to the post, and
/// return the stored key.
async fn attach_upload(
    service: &PostService,
    post: &mut Post,
    upload: CoverImageUpload,
) -> AppResult<String> {
    if upload.content_type.parse::<mime::Mime>().is_err() {
        return Err(AppError::BadRequest(format!(
            "Unparseable content type '{}'",
            upload.content_type
        )));
    }

    // Tolerate a data URL prefix (data:image/png;base64,...)
    let encoded = upload
        .data
        .split_once(',')
        .map_or(upload.data.as_str(), |(_, rest)| rest);

    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| AppError::BadRequest("Invalid base64 image data".to_string()))?;

    let image = service
        .storage()
        .store(bytes, &upload.filename, &upload.content_type)
        .await?;
    let key = image.key.clone();
    post.attach_cover_image(image);
    Ok(key)
}

/// Project a domain post into its API shape, presentation URLs included.
fn post_response(service: &PostService, post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        slug: post.slug.clone(),
        title: post.title.clone(),
        summary: post.summary.clone(),
        content: post.content.clone(),
        topic: post.topic.clone(),
        author_name: post.author_name.clone(),
        author_email: post.author_email.clone(),
        featured: post.featured,
        published: post.published,
        reading_time: post.reading_time,
        gravatar_url: post.gravatar(quill_core::domain::DEFAULT_AVATAR_SIZE),
        cover_image_url: service.cover_image_url(post),
        cover_image_path: service.cover_image_path(post),
        thumbnail_path: service.cover_image_variant_path(post, Variant::Thumbnail),
        featured_image_path: service.cover_image_variant_path(post, Variant::Featured),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;

    use super::*;
    use crate::handlers::configure_routes;
    use crate::state::tests::memory_state;

    fn upload_json() -> serde_json::Value {
        json!({
            "filename": "cover.png",
            "content_type": "image/png",
            "data": general_purpose::STANDARD.encode([1u8, 2, 3]),
        })
    }

    #[actix_web::test]
    async fn test_rejected_create_discards_stored_blob() {
        let state = memory_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        // Blank title fails validation, so nothing may be left in storage.
        let body = json!({
            "title": "",
            "summary": "A summary",
            "content": "Some content",
            "topic": "rust",
            "author_name": "Ada",
            "author_email": "ada@example.com",
            "cover_image": upload_json(),
        });
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(state.storage.blob_count().await, 0);
    }

    #[actix_web::test]
    async fn test_accepted_create_keeps_stored_blob() {
        let state = memory_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure_routes),
        )
        .await;

        let body = json!({
            "title": "First Post",
            "summary": "A summary",
            "content": "Some content",
            "topic": "rust",
            "author_name": "Ada",
            "author_email": "ada@example.com",
            "cover_image": upload_json(),
        });
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(state.storage.blob_count().await, 1);
    }
}
