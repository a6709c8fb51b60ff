use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::SessionError;
use crate::config::SupabaseConfig;

/// Where the admin frontend lands once a session is established.
pub const DASHBOARD_PATH: &str = "/admin";

/// Credentials posted to `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A session issued by Supabase Auth for the password grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

/// Thin client for the Supabase Auth endpoints used by the admin panel.
#[derive(Clone)]
pub struct SessionClient {
    client: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl SessionClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth_url: config.auth_url(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, credentials: &LoginRequest) -> Result<Session, SessionError> {
        debug!(email = %credentials.email, "Signing in");

        let response = self
            .client
            .post(format!("{}/token?grant_type=password", self.auth_url))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = rejection_message(response).await;
            warn!(status = status.as_u16(), "Sign-in rejected: {message}");
            return Err(SessionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Revoke the session that owns `access_token`.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SessionError> {
        let response = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Rejected {
                status: status.as_u16(),
                message: rejection_message(response).await,
            });
        }
        Ok(())
    }
}

async fn rejection_message(response: reqwest::Response) -> String {
    match response.json::<AuthErrorBody>().await {
        Ok(body) => body
            .error_description
            .or(body.msg)
            .or(body.message)
            .unwrap_or_else(|| "Authentication failed".to_string()),
        Err(_) => "Authentication failed".to_string(),
    }
}
