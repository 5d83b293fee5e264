//! HS256 token issue/verify shared by the auth service and the HTTP middleware.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::domain::{AuthUser, Claims};
use super::errors::AuthError;

pub fn issue(secret: &str, user: &AuthUser, ttl_hours: i64) -> Result<String, AuthError> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp();
    let claims = Claims {
        sub: user.email.clone(),
        uid: user.id,
        role: user.role,
        exp: usize::try_from(exp).map_err(|e| AuthError::TokenError(e.to_string()))?,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Verifies signature and expiry.
pub fn verify(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::TokenError(e.to_string()))
}
