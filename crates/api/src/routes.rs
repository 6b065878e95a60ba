use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use vitrine_media::MAX_UPLOAD_BYTES;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Everything below requires a valid admin session cookie
    let admin = Router::new()
        .route("/admin/api/messages", get(handlers::messages::list_messages))
        .route(
            "/admin/api/messages/:id/archive",
            post(handlers::messages::archive_message),
        )
        .route(
            "/admin/api/messages/:id",
            delete(handlers::messages::delete_message),
        )
        .route(
            "/admin/api/archived/messages",
            get(handlers::archive::list_archived_messages),
        )
        .route(
            "/admin/api/archived/messages/:id",
            delete(handlers::archive::permanently_delete_archived_message),
        )
        .route("/admin/api/offers", post(handlers::offers::create_offer))
        .route(
            "/admin/api/offers/:id",
            put(handlers::offers::update_offer).delete(handlers::offers::delete_offer),
        )
        .route("/admin/api/blog", post(handlers::blog::create_blog_post))
        .route(
            "/admin/api/blog/:id",
            put(handlers::blog::update_blog_post).delete(handlers::blog::delete_blog_post),
        )
        .route("/admin/api/blog/all", get(handlers::blog::list_all_blog_posts))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Admin session management (login must stay reachable unauthenticated)
        .route("/admin/login", post(handlers::auth::login))
        .route("/admin/logout", post(handlers::auth::logout))
        .route("/admin/check", get(handlers::auth::check))
        // Public contact form
        .route("/contact/message", post(handlers::contact::submit_message))
        // Public content
        .route("/api/offers", get(handlers::offers::list_offers))
        .route("/api/offers/:id/image", get(handlers::offers::offer_image))
        .route("/api/blog", get(handlers::blog::list_blog_posts))
        .route("/api/blog/slug/:slug", get(handlers::blog::blog_post_by_slug))
        .route("/api/blog/:id/image", get(handlers::blog::blog_post_image))
        .merge(admin)
        // Uploads are capped by the pipeline; allow a little multipart overhead
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}
