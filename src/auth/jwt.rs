use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SessionError;
use crate::auth::jwks::JwksCache;

/// Supabase JWT claims.
///
/// The `sub` field is the admin's UUID in `auth.users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The Supabase auth user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Issuer, normally the Supabase URL + `/auth/v1`.
    pub iss: Option<String>,
    pub email: Option<String>,
    /// Supabase role (e.g. "authenticated").
    pub role: Option<String>,
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, SessionError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| SessionError::InvalidToken(format!("Invalid UUID in sub claim: {e}")))
    }

    /// Best-effort display name from metadata.
    pub fn display_name(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.full_name.clone().or_else(|| m.name.clone()))
    }

    /// Best-effort email: prefer top-level, fall back to metadata.
    pub fn user_email(&self) -> Option<String> {
        self.email
            .clone()
            .or_else(|| self.user_metadata.as_ref().and_then(|m| m.email.clone()))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp as i64, 0)
    }
}

/// Validate a Supabase JWT and return the decoded claims.
pub async fn validate_token(token: &str, jwks_cache: &JwksCache) -> Result<Claims, SessionError> {
    jwks_cache.validate_token(token).await.map(|td| td.claims)
}
