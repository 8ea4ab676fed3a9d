use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, Secret};
use tracing::instrument;

use super::{read_envelope, with_auth};
use crate::core::AppError;
use crate::models::uploads::{ImageKind, UploadFile, UploadedFile};

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload(&self, file: &UploadFile, kind: ImageKind) -> Result<String, AppError>;
}

pub struct HttpFileStorage {
    http: reqwest::Client,
    upload_url: String,
    token: Option<Secret<String>>,
}

impl HttpFileStorage {
    pub fn new(http: reqwest::Client, base_url: &str, token: Option<Secret<String>>) -> Self {
        Self {
            http,
            upload_url: format!("{}/uploads", base_url.trim_end_matches('/')),
            token,
        }
    }
}

#[async_trait]
impl FileStorage for HttpFileStorage {
    #[instrument(name = "Upload Image", skip(self, file), fields(file_name = %file.file_name, kind = kind.as_str()))]
    async fn upload(&self, file: &UploadFile, kind: ImageKind) -> Result<String, AppError> {
        file.validate()?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AppError::validation_error(format!("Invalid content type: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("type", kind.as_str().to_string());

        let token = self.token.as_ref().map(|t| t.expose_secret().as_str());
        let response = with_auth(self.http.post(&self.upload_url), token)
            .multipart(form)
            .send()
            .await?;

        let uploaded: UploadedFile = read_envelope(response).await?;
        tracing::info!("Uploaded {} to {}", kind.as_str(), uploaded.url);
        Ok(uploaded.url)
    }
}
