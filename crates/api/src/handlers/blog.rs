use crate::handlers::auth::ErrorResponse;
use crate::handlers::upload::{self, FormFields};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::{header::CONTENT_TYPE, HeaderName, StatusCode},
    Json,
};
use std::sync::Arc;
use vitrine_database::{repositories::blog::BlogPostChanges, DatabaseError};
use vitrine_models::{BlogPostDto, NewBlogPost};

fn db_error(e: DatabaseError) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        DatabaseError::NotFound(what) => {
            tracing::debug!("Not found: {}", what);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("not_found", "Blog post not found")),
            )
        }
        e => {
            tracing::error!("Blog storage error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("internal_error", "Database error")),
            )
        }
    }
}

pub async fn create_blog_post(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<BlogPostDto>, (StatusCode, Json<ErrorResponse>)> {
    let mut fields = FormFields::parse(multipart).await?;
    let (image, image_mime) = match upload::process_image(fields.image.take())? {
        Some((bytes, mime)) => (Some(bytes), Some(mime)),
        None => (None, None),
    };

    let new_post = NewBlogPost {
        title: fields.required("title")?,
        slug: fields.required("slug")?,
        excerpt: fields.optional("excerpt"),
        content: fields.required("content")?,
        image,
        image_mime,
        published: fields.flag("published"),
    };

    let post = state.blog.create(&new_post).await.map_err(db_error)?;

    tracing::info!("Blog post {} created", post.id);
    Ok(Json(BlogPostDto::from(post)))
}

pub async fn update_blog_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let mut fields = FormFields::parse(multipart).await?;
    let image = upload::image_update(fields.image.take(), fields.flag("keep_existing_image"))?;

    let changes = BlogPostChanges {
        title: fields.required("title")?,
        slug: fields.required("slug")?,
        excerpt: fields.optional("excerpt"),
        content: fields.required("content")?,
        published: fields.flag("published"),
    };

    state
        .blog
        .update(id, &changes, image)
        .await
        .map_err(db_error)?;

    tracing::info!("Blog post {} updated", id);
    Ok(StatusCode::OK)
}

pub async fn delete_blog_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.blog.delete(id).await.map_err(db_error)?;
    tracing::info!("Blog post {} deleted", id);
    Ok(StatusCode::OK)
}

/// Public listing: published posts only
pub async fn list_blog_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BlogPostDto>>, (StatusCode, Json<ErrorResponse>)> {
    let posts = state.blog.list_published().await.map_err(db_error)?;
    Ok(Json(posts.into_iter().map(BlogPostDto::from).collect()))
}

/// Admin listing: every post, drafts included
pub async fn list_all_blog_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BlogPostDto>>, (StatusCode, Json<ErrorResponse>)> {
    let posts = state.blog.list_all().await.map_err(db_error)?;
    Ok(Json(posts.into_iter().map(BlogPostDto::from).collect()))
}

pub async fn blog_post_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostDto>, (StatusCode, Json<ErrorResponse>)> {
    let post = state.blog.find_by_slug(&slug).await.map_err(db_error)?;

    match post {
        Some(post) => Ok(Json(BlogPostDto::from(post))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("not_found", "Blog post not found")),
        )),
    }
}

pub async fn blog_post_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<([(HeaderName, String); 1], Vec<u8>), (StatusCode, Json<ErrorResponse>)> {
    let image = state.blog.image(id).await.map_err(db_error)?;

    match image {
        Some((bytes, mime)) => Ok(([(CONTENT_TYPE, mime)], bytes)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("not_found", "Blog post has no image")),
        )),
    }
}
