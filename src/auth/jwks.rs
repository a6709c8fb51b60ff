use jsonwebtoken::{Algorithm, DecodingKey, TokenData, Validation, decode, decode_header};
use moka::future::Cache;
use std::sync::Arc;
use tracing::debug;

use super::SessionError;
use super::jwt::Claims;
use crate::config::SupabaseConfig;

#[derive(Clone)]
struct JwksKeyData {
    x: String,
    y: String,
    algorithm: Algorithm,
}

/// Validates Supabase access tokens.
///
/// Asymmetric (ES256/ES384) tokens are checked against the project's JWKS,
/// whose keys are cached for an hour. HS256 tokens are accepted only when a
/// shared secret is configured.
#[derive(Clone)]
pub struct JwksCache {
    cache: Arc<Cache<String, JwksKeyData>>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
    shared_secret: Option<String>,
}

impl JwksCache {
    pub fn new(config: &SupabaseConfig) -> Self {
        let client = reqwest::Client::new();
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(std::time::Duration::from_secs(3600))
                .max_capacity(10)
                .build(),
        );

        Self {
            cache,
            jwks_url: format!("{}/.well-known/jwks.json", config.auth_url()),
            client,
            anon_key: config.anon_key.clone(),
            shared_secret: config.jwt_secret.clone(),
        }
    }

    async fn fetch_jwks(&self) -> Result<serde_json::Value, SessionError> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Jwks(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| SessionError::Jwks(format!("Failed to parse JWKS JSON: {e}")))
    }

    async fn get_key_data(&self, kid: &str) -> Result<JwksKeyData, SessionError> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let jwks = self.fetch_jwks().await?;
        let keys = jwks["keys"]
            .as_array()
            .ok_or_else(|| SessionError::Jwks("No keys in JWKS".to_string()))?;

        let key_data = keys
            .iter()
            .find(|k| k["kid"].as_str() == Some(kid))
            .ok_or_else(|| SessionError::Jwks(format!("Key with kid={kid} not found in JWKS")))?;

        let coordinate = |name: &str| {
            key_data[name]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SessionError::Jwks(format!("Missing '{name}' in JWK")))
        };
        let x = coordinate("x")?;
        let y = coordinate("y")?;

        let algorithm = match key_data["alg"].as_str().unwrap_or("ES256") {
            "ES384" => Algorithm::ES384,
            _ => Algorithm::ES256,
        };

        let key_data = JwksKeyData { x, y, algorithm };

        self.cache.insert(kid.to_string(), key_data.clone()).await;
        Ok(key_data)
    }

    pub async fn validate_token(&self, token: &str) -> Result<TokenData<Claims>, SessionError> {
        let header = decode_header(token)
            .map_err(|e| SessionError::InvalidToken(format!("Failed to decode header: {e}")))?;

        let (decoding_key, algorithm) = match header.alg {
            Algorithm::HS256 => {
                let secret = self.shared_secret.as_ref().ok_or_else(|| {
                    SessionError::InvalidToken("HS256 tokens are not accepted".to_string())
                })?;
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            _ => {
                let kid = header
                    .kid
                    .ok_or_else(|| SessionError::InvalidToken("No 'kid' in token header".to_string()))?;
                let key_data = self.get_key_data(&kid).await?;
                let key = DecodingKey::from_ec_components(&key_data.x, &key_data.y).map_err(|e| {
                    SessionError::Jwks(format!("Failed to create decoding key: {e}"))
                })?;
                (key, key_data.algorithm)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;

        decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| SessionError::InvalidToken(format!("{:?}", e.kind())))
    }
}
