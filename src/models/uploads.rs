use serde::{Deserialize, Serialize};

use crate::core::AppError;
use crate::models::settings::{DEFAULT_BANNER_ALT, DEFAULT_LOGO_ALT};

pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024; // 5MB

const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/gif",
    "image/svg+xml",
];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Logo,
    Banner,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Banner => "banner",
        }
    }

    pub fn default_alt(&self) -> &'static str {
        match self {
            Self::Logo => DEFAULT_LOGO_ALT,
            Self::Banner => DEFAULT_BANNER_ALT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::validation_error("File is empty"));
        }
        if self.bytes.len() > MAX_IMAGE_SIZE {
            return Err(AppError::validation_error(
                "File size exceeds maximum limit (5MB)",
            ));
        }
        if !ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::validation_error(format!(
                "Unsupported image type: {}",
                self.content_type
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,
}
