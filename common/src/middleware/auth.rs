//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs whose subject is the tenant ID. Protected handlers
//! take an [`AuthTenant`] argument; the extractor rejects the request with
//! 401 before any database work happens.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::errors::{AppError, AppResult};

/// Token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Tenant ID.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<KeysInner>,
}

struct KeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            inner: Arc::new(KeysInner {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                ttl: Duration::hours(config.expiration_hours),
            }),
        }
    }

    /// Issues an access token for `tenant_id`.
    pub fn issue(&self, tenant_id: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: tenant_id.to_string(),
            exp: (now + self.inner.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.inner.encoding)
            .map_err(|e| AppError::Internal(format!("failed to encode token: {}", e)))
    }

    /// Verifies a token and returns the tenant ID it was issued for.
    pub fn verify(&self, token: &str) -> AppResult<i64> {
        let data = decode::<Claims>(token, &self.inner.decoding, &Validation::default())
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        data.claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("malformed subject".into()))
    }
}

/// Extract bearer token from Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// The authenticated tenant of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTenant(pub i64);

impl<S> FromRequestParts<S> for AuthTenant
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

        let keys = JwtKeys::from_ref(state);
        let tenant_id = keys.verify(token)?;
        tracing::debug!(tenant_id, "request authenticated");
        Ok(AuthTenant(tenant_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.to_string(),
            expiration_hours: 24,
        })
    }

    const SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

    #[test]
    fn test_issue_then_verify() {
        let keys = keys(SECRET);
        let token = keys.issue(42).unwrap();
        assert_eq!(keys.verify(&token).unwrap(), 42);
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let token = keys(SECRET).issue(42).unwrap();
        let other = keys("another-secret-key-that-is-also-long-enough!");
        assert!(matches!(other.verify(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), None);
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_extractor_requires_token() {
        let keys = keys(SECRET);
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let result = AuthTenant::from_request_parts(&mut parts, &keys).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let token = keys.issue(7).unwrap();
        let (mut parts, _) = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(())
            .unwrap()
            .into_parts();
        let tenant = AuthTenant::from_request_parts(&mut parts, &keys).await.unwrap();
        assert_eq!(tenant, AuthTenant(7));
    }
}
