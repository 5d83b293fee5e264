use std::sync::Arc;

use axum::{Extension, Json, extract::{State, Request}, http::{header, Method, StatusCode}, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use uuid::Uuid;

use service::auth::{domain::{LoginInput, RegisterInput}, repository::AuthRepository, token, AuthService};
use service::identity::{Actor, UserRole};
use service::posting::{repository::PostingRepository, PostingService};

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub postings: Arc<PostingService<dyn PostingRepository>>,
    pub jwt_secret: Arc<str>,
}

#[derive(Serialize)]
pub struct RegisterOutput { pub user_id: Uuid, pub role: UserRole }

#[derive(Serialize)]
pub struct LoginOutput { pub user_id: Uuid, pub email: String, pub name: String, pub role: UserRole, pub token: String }

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> Result<Json<RegisterOutput>, JsonApiError> {
    let user = state.auth.register(input).await?;
    Ok(Json(RegisterOutput { user_id: user.id, role: user.role }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, Json(input): Json<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let user = session.user;
    let Some(token) = session.token else {
        return Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Login Failed", Some("token generation failed".into())));
    };
    let mut cookie = Cookie::new(AUTH_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    let out = LoginOutput { user_id: user.id, email: user.email, name: user.name, role: user.role, token };
    Ok((jar, Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

/// Bearer token from `Authorization`, falling back to the `auth_token` cookie.
/// `Err` carries the rejection for a malformed header.
fn extract_token(req: &Request) -> Result<Option<String>, JsonApiError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return match h.strip_prefix("Bearer ") {
            Some(tok) if !tok.trim().is_empty() => Ok(Some(tok.trim().to_string())),
            _ => {
                tracing::warn!(path = %req.uri().path(), "invalid Authorization format (expect Bearer)");
                Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("expected Bearer token".into())))
            }
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

/// 校验 Authorization: Bearer <token>（或 auth_token Cookie），并将 Actor 注入请求扩展
/// 缺失 token 返回 400，非法或过期返回 401
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    // CORS 预检直接放行
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let Some(tok) = extract_token(&req)? else {
        tracing::warn!(path = %req.uri().path(), "missing Authorization header and auth_token cookie");
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Missing Token", None));
    };

    match token::verify(&state.jwt_secret, &tok) {
        Ok(claims) => {
            req.extensions_mut().insert(claims.actor());
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), err = %e, "token validation failed");
            Err(JsonApiError::new(StatusCode::UNAUTHORIZED, "Invalid Token", Some(e.to_string())))
        }
    }
}

/// Runs after `require_bearer_token`; only ADMIN actors pass.
pub async fn require_admin(Extension(actor): Extension<Actor>, req: Request, next: Next) -> Result<Response, JsonApiError> {
    if !actor.is_admin() {
        tracing::warn!(user_id = %actor.id, path = %req.uri().path(), "admin route denied");
        return Err(JsonApiError::new(StatusCode::FORBIDDEN, "Forbidden", Some("admin role required".into())));
    }
    Ok(next.run(req).await)
}
