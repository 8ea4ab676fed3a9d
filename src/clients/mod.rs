mod file_storage;
mod image_cache;
mod profile_api;

pub use file_storage::*;
pub use image_cache::*;
pub use profile_api::*;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::core::config::ApiConfig;
use crate::core::{ApiResponse, AppError};

pub fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, AppError> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder.build().map_err(AppError::internal_error)
}

pub(crate) fn with_auth(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Unwrap the `{success, data, message}` envelope, turning non-2xx statuses
/// and empty payloads into `AppError`s.
pub(crate) async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        return Err(AppError::api_error(status.as_u16(), message));
    }

    let envelope: ApiResponse<T> = response.json().await?;
    envelope.data.ok_or_else(|| {
        AppError::api_error(
            status.as_u16(),
            envelope
                .message
                .unwrap_or_else(|| "Response carried no data".to_string()),
        )
    })
}
