//! JWT authentication module.
//!
//! Admin tokens carry the ACL resources the admin holds. Handlers take an
//! [`AdminIdentity`] argument and ask it whether a resource is allowed.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Resource granting every other resource.
pub const ALL_RESOURCES: &str = "admin::all";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin username)
    pub sub: String,

    /// ACL resources held by the admin
    #[serde(default)]
    pub resources: Vec<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT token manager.
#[derive(Clone)]
pub struct JwtManager {
    secret: String,
    lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            lifetime_secs,
        }
    }

    /// Issue a token for an admin holding `resources`.
    pub fn issue_token(&self, username: &str, resources: &[String]) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: username.to_string(),
            resources: resources.to_vec(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ApiError::AuthFailed(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Answers whether the current caller holds an ACL resource.
pub trait AuthorizationChecker: Send + Sync {
    fn is_allowed(&self, resource: &str) -> bool;
}

/// The authenticated admin making the request.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
    pub resources: Vec<String>,
}

impl AdminIdentity {
    /// Fails with `Forbidden` unless `resource` is allowed.
    pub fn require(&self, resource: &str) -> Result<(), ApiError> {
        if self.is_allowed(resource) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(resource.to_string()))
        }
    }
}

impl AuthorizationChecker for AdminIdentity {
    fn is_allowed(&self, resource: &str) -> bool {
        self.resources
            .iter()
            .any(|held| held == resource || held == ALL_RESOURCES)
    }
}

impl From<Claims> for AdminIdentity {
    fn from(claims: Claims) -> Self {
        AdminIdentity {
            username: claims.sub,
            resources: claims.resources,
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AdminIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::AuthFailed("Missing authorization header".to_string()))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| ApiError::AuthFailed("Expected a bearer token".to_string()))?;

        Ok(state.jwt.validate_token(token)?.into())
    }
}
