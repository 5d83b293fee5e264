use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::metrics;
use crate::openapi::ApiDoc;

pub mod admin;
pub mod auth;
pub mod comments;
pub mod postings;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router, including public, protected, and admin routes
pub fn build_router(state: auth::ServerState, cors: CorsLayer) -> Router {
    // Public routes (health, auth, metrics, docs)
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/metrics", get(metrics::metrics_handler))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Admin routes; the bearer layer below runs first and provides the Actor
    let admin_routes = Router::new()
        .route("/admin/postings/:id/solve", post(admin::solve))
        .route("/admin/postings/:id/refuse", post(admin::refuse))
        .route("/admin/posting-quota", get(admin::get_quota).put(admin::set_quota))
        .route_layer(middleware::from_fn(auth::require_admin));

    // Protected API routes
    let protected = Router::new()
        .route("/postings", get(postings::list).post(postings::create))
        .route("/postings/page", get(postings::page))
        .route("/postings/quota", get(postings::quota))
        .route("/postings/tag/:tag", get(postings::by_tag))
        .route("/postings/:id", get(postings::get).put(postings::modify).delete(postings::delete))
        .route(
            "/postings/:id/sympathy",
            post(postings::sign_sympathy).delete(postings::cancel_sympathy),
        )
        .route("/postings/:id/sympathy/toggle", post(postings::toggle_sympathy))
        .route("/postings/:id/comments", get(postings::list_comments).post(postings::create_comment))
        .route("/comments/:id", put(comments::modify).delete(comments::delete))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    // Compose
    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
