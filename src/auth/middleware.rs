use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::jwks::JwksCache;
use crate::auth::jwt::{self, Claims};

/// The signed-in admin behind a request.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip)]
    pub access_token: String,
}

impl AdminSession {
    pub fn from_claims(claims: &Claims, access_token: &str) -> Result<Self, super::SessionError> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.user_email(),
            display_name: claims.display_name(),
            role: claims.role.clone(),
            expires_at: claims.expires_at(),
            access_token: access_token.to_string(),
        })
    }
}

/// Extractor guarding the admin routes: requires a valid Supabase access token.
///
/// Requests without one are rejected with 401 so the admin frontend can send
/// the user to its login page.
pub struct AuthenticatedAdmin(pub AdminSession);

impl FromRequest for AuthenticatedAdmin {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let bearer = BearerAuth::extract(&req).await.map_err(|_| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;
            let token = bearer.token();

            // 2. Get the JWKS cache from app data.
            let jwks_cache = req.app_data::<web::Data<Arc<JwksCache>>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("JWKS cache not configured")
            })?;

            // 3. Validate the JWT.
            let claims = jwt::validate_token(token, jwks_cache.get_ref())
                .await
                .map_err(|e| actix_web::error::ErrorUnauthorized(e.to_string()))?;

            let session = AdminSession::from_claims(&claims, token)
                .map_err(|e| actix_web::error::ErrorUnauthorized(e.to_string()))?;

            Ok(AuthenticatedAdmin(session))
        })
    }
}
