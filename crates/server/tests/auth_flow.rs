use std::sync::Arc;

use axum::Router;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, auth};
use service::auth::{repository::{mock::MockAuthRepository, AuthRepository}, service::AuthConfig, AuthService};
use service::posting::{domain::PostingConfig, repository::{mock::MockPostingRepository, PostingRepository}, PostingService};

const SECRET: &str = "auth-flow-secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    let auth_repo: Arc<dyn AuthRepository> = Arc::new(MockAuthRepository::default());
    let posting_repo: Arc<dyn PostingRepository> = Arc::new(MockPostingRepository::default());
    let auth_cfg = AuthConfig { jwt_secret: Some(SECRET.into()), admin_emails: vec!["dean@school.edu".into()], ..AuthConfig::default() };
    let state = auth::ServerState {
        auth: Arc::new(AuthService::new(auth_repo, auth_cfg)),
        postings: Arc::new(PostingService::new(posting_repo, PostingConfig::default())),
        jwt_secret: Arc::from(SECRET),
    };
    routes::build_router(state, cors())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = build_app();
    let resp = app.oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = build_app();
    let email = "student@school.edu";
    let password = "S3curePass!";

    // Register
    let resp = app.clone().oneshot(post_json("/auth/register", json!({"email": email, "name": "Tester", "password": password}))).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["role"], "USER");

    // Duplicate
    let resp = app.clone().oneshot(post_json("/auth/register", json!({"email": email, "name": "Again", "password": password}))).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["code"], 1002);
    assert_eq!(body["error"], "Conflict");

    // Login sets the auth cookie
    let resp = app.clone().oneshot(post_json("/auth/login", json!({"email": email, "password": password}))).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cookie.starts_with("auth_token="));
    let token = body_json(resp).await["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    // Cookie alone authenticates
    let cookie_pair = cookie.split(';').next().unwrap_or_default().to_string();
    let req = Request::builder().uri("/postings").header("cookie", cookie_pair).body(Body::empty())?;
    assert_eq!(app.clone().oneshot(req).await?.status(), StatusCode::OK);

    // Wrong password
    let resp = app.oneshot(post_json("/auth/login", json!({"email": email, "password": "wrong-pass"}))).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_400_and_bad_token_is_401() -> anyhow::Result<()> {
    let app = build_app();
    let resp = app.clone().oneshot(Request::builder().uri("/postings").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = Request::builder().uri("/postings").header("authorization", "Bearer not-a-jwt").body(Body::empty())?;
    assert_eq!(app.clone().oneshot(req).await?.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder().uri("/postings").header("authorization", "Basic abc").body(Body::empty())?;
    assert_eq!(app.oneshot(req).await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder().method("POST").uri("/auth/logout").header("cookie", "auth_token=stale").body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    Ok(())
}
