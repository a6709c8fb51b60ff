//! Redis cache for the public read endpoints.
//!
//! Values are stored as JSON strings under `public:*` keys and dropped as a
//! group whenever the admin changes anything.

use redis::{AsyncCommands, Client, ErrorKind, RedisError, RedisResult, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

/// Keys fetched per SCAN round trip during invalidation.
const SCAN_BATCH: usize = 100;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Cached value for `key`, if present and decodable.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<T>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(key).await?;
        raw.map(|json| serde_json::from_str(&json).map_err(|e| json_error("decode", e)))
            .transpose()
    }

    /// Store `value` under `key` for `ttl` (at least one second).
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> RedisResult<()> {
        let json = serde_json::to_string(value).map_err(|e| json_error("encode", e))?;
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(json)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await
    }

    /// Delete every key matching `pattern`, walking the keyspace with SCAN.
    pub async fn delete_pattern(&self, pattern: &str) -> RedisResult<usize> {
        let mut conn = self.connection.clone();
        let mut cursor: u64 = 0;
        let mut deleted = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let removed: usize = conn.del(&keys).await?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(deleted)
    }

    /// Drop every cached public response. Failures are logged, never returned.
    pub async fn invalidate_public(&self) {
        match self.delete_pattern(keys::PUBLIC_PATTERN).await {
            Ok(deleted) => debug!(deleted, "Invalidated public cache"),
            Err(e) => warn!("Failed to invalidate public cache: {e}"),
        }
    }
}

fn json_error(action: &'static str, e: serde_json::Error) -> RedisError {
    RedisError::from((ErrorKind::TypeError, action, e.to_string()))
}

pub mod keys {
    pub const PUBLIC_PATTERN: &str = "public:*";

    pub fn home() -> String {
        "public:home".to_string()
    }

    pub fn portfolios() -> String {
        "public:portfolios".to_string()
    }

    pub fn portfolio(slug: &str) -> String {
        format!("public:portfolio:{slug}")
    }

    pub fn services() -> String {
        "public:services".to_string()
    }
}
