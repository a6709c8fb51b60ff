use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::Deserialize;

use super::error_response;
use crate::auth::middleware::AuthenticatedAdmin;
use crate::storage::{StorageClient, StorageError};

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/admin/uploads?filename=cover.png — store the raw request body as an image.
///
/// Returns the object path and its public URL for use as `featured_image`
/// or in `gallery_images`.
pub async fn upload_image(
    admin: AuthenticatedAdmin,
    req: HttpRequest,
    storage: web::Data<StorageClient>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    let content_type = req
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match storage
        .upload(&admin.0.access_token, &query.filename, content_type, body.to_vec())
        .await
    {
        Ok(object) => HttpResponse::Created().json(object),
        Err(StorageError::Empty) => {
            error_response(HttpResponse::BadRequest(), "Upload body is empty".to_string())
        }
        Err(e) => {
            tracing::error!("Image upload failed: {e}");
            error_response(
                HttpResponse::BadGateway(),
                format!("Failed to upload image: {e}"),
            )
        }
    }
}
