use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_STORAGE_BUCKET: &str = "portfolio-images";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid SUPABASE_URL format: {0}. Expected: https://PROJECT.supabase.co")]
    InvalidSupabaseUrl(String),
}

/// Runtime configuration read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub supabase: SupabaseConfig,
    /// Public site origin used for sitemap URLs, without trailing slash.
    pub site_url: String,
    pub port: u16,
    /// CORS origin for the admin frontend; any origin when unset.
    pub allowed_origin: Option<String>,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// e.g. `https://abcd.supabase.co`, without trailing slash.
    pub url: String,
    pub project_ref: String,
    pub anon_key: String,
    pub storage_bucket: String,
    /// Legacy HS256 signing secret; asymmetric tokens are checked against the JWKS.
    pub jwt_secret: Option<String>,
}

/// TTLs for the public read cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub public_ttl: Duration,
    pub detail_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            public_ttl: Duration::from_secs(300), // 5 minutes
            detail_ttl: Duration::from_secs(600), // 10 minutes
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            public_ttl: parse_duration_secs("CACHE_TTL_PUBLIC", 300),
            detail_ttl: parse_duration_secs("CACHE_TTL_DETAIL", 600),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url = required("SUPABASE_URL")?;
        let supabase = SupabaseConfig::new(
            &supabase_url,
            required("SUPABASE_ANON_KEY")?,
            optional("STORAGE_BUCKET").unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string()),
        )?
        .with_jwt_secret(optional("SUPABASE_JWT_SECRET"));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            supabase,
            site_url: optional("SITE_URL")
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            port: optional("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            allowed_origin: optional("ALLOWED_ORIGIN"),
            cache: CacheConfig::from_env(),
        })
    }
}

impl SupabaseConfig {
    pub fn new(url: &str, anon_key: String, storage_bucket: String) -> Result<Self, ConfigError> {
        let url = url.trim_end_matches('/').to_string();
        let project_ref = url
            .strip_prefix("https://")
            .and_then(|s| s.strip_suffix(".supabase.co"))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::InvalidSupabaseUrl(url.clone()))?
            .to_string();

        Ok(Self {
            url,
            project_ref,
            anon_key,
            storage_bucket,
            jwt_secret: None,
        })
    }

    pub fn with_jwt_secret(mut self, secret: Option<String>) -> Self {
        self.jwt_secret = secret;
        self
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
