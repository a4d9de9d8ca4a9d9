// ==================== MEDIA HOST UPLOADS ====================
// Envia imagens para o host de mídia (API compatível com Cloudinary)

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{config::MediaConfig, utils::AppError};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct MediaHostResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    error: Option<MediaHostError>,
}

#[derive(Debug, Deserialize)]
struct MediaHostError {
    message: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadedImage {
    pub secure_url: String,
}

pub fn not_configured() -> AppError {
    AppError::ExternalService("Media upload is not configured".to_string())
}

/// Criado uma vez na inicialização; o `reqwest::Client` mantém o pool de conexões
pub struct MediaClient {
    http: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

impl MediaClient {
    pub fn from_config(config: &MediaConfig) -> Result<Self, AppError> {
        let (Some(cloud_name), Some(upload_preset)) = (&config.cloud_name, &config.upload_preset)
        else {
            return Err(not_configured());
        };

        let http = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/{}/image/upload",
                config.api_base.trim_end_matches('/'),
                cloud_name
            ),
            upload_preset: upload_preset.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `file` + `upload_preset` as multipart form data and returns the
    /// hosted image's https URL. No retries, no local checks on the payload.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, AppError> {
        log::info!(
            "📤 Uploading {} ({} bytes) to {}",
            file_name,
            bytes.len(),
            self.endpoint()
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("upload_preset", self.upload_preset.clone());

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body: MediaHostResponse = response.json().await?;

        if !status.is_success() {
            let reason = body
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(AppError::ExternalService(format!(
                "Media host returned {}: {}",
                status, reason
            )));
        }

        let secure_url = body.secure_url.ok_or_else(|| {
            AppError::ExternalService("Media host response has no secure_url".to_string())
        })?;

        Ok(UploadedImage { secure_url })
    }
}
