//! Image uploads to Supabase Storage.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::SupabaseConfig;

/// Folder inside the bucket that holds uploaded portfolio images.
const UPLOAD_FOLDER: &str = "portfolios";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage returned HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("empty upload")]
    Empty,
}

/// An object stored in the bucket.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredObject {
    pub path: String,
    pub public_url: String,
}

#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    anon_key: String,
}

impl StorageClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.storage_url(),
            bucket: config.storage_bucket.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Public URL for `path`. Values that already are absolute URLs pass through.
    pub fn public_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/object/public/{}/{}",
            self.base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    /// Upload `bytes` under a fresh object name and return its public URL.
    ///
    /// The request is made with the admin's access token so the bucket's
    /// policies apply to the signed-in user.
    pub async fn upload(
        &self,
        access_token: &str,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<StoredObject, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }

        let path = object_path(file_name, chrono::Utc::now().timestamp_millis());
        let size = bytes.len();

        let mut request = self
            .client
            .post(format!("{}/object/{}/{}", self.base_url, self.bucket, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .body(bytes);
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(path = %path, size, "Stored image");
        Ok(StoredObject {
            public_url: self.public_url(&path),
            path,
        })
    }
}

/// Object path for an upload: `portfolios/{millis}-{random}.{ext}`.
///
/// The extension is taken from the original file name; names without one get `bin`.
pub fn object_path(file_name: &str, timestamp_millis: i64) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    let random: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();
    format!("{UPLOAD_FOLDER}/{timestamp_millis}-{random}.{ext}")
}
