use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::{
    models::{ApiResponse, MessageResponse},
    services::upload_service::{self, MediaClient, UploadedImage},
};

const DEFAULT_FILE_NAME: &str = "upload";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Nome do arquivo enviado ao host de mídia
    pub filename: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/uploads/image",
    tag = "Uploads",
    params(UploadQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image hosted", body = UploadedImage),
        (status = 400, description = "Empty body"),
        (status = 502, description = "Media host rejected the upload or is not configured")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    media: Option<web::Data<MediaClient>>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> HttpResponse {
    if body.is_empty() {
        return HttpResponse::BadRequest().json(MessageResponse::failure("No image provided"));
    }

    // Registered at startup only when the media host settings are present
    let Some(client) = media else {
        let e = upload_service::not_configured();
        log::error!("❌ {}", e);
        return e.error_response();
    };

    let file_name = query
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME);

    match client.upload_image(file_name, body.to_vec()).await {
        Ok(uploaded) => {
            log::info!("✅ Image hosted at {}", uploaded.secure_url);
            HttpResponse::Ok().json(ApiResponse::ok("Image uploaded", uploaded))
        }
        Err(e) => {
            log::error!("❌ Upload of {} failed: {}", file_name, e);
            e.error_response()
        }
    }
}
