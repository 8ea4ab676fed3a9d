use redis::RedisError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorType {
    NotFoundError,
    NetworkError,
    ApiError { status: u16, message: String },
    JsonParseError,
    StorageError,
    PayloadValidationError,
    TemplateNotFound,
    ConfigError,
    InternalError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    pub error_type: AppErrorType,
    pub message: Option<String>,
    pub cause: Option<String>,
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            AppError {
                message: Some(message),
                ..
            } => message.clone(),

            AppError {
                message: None,
                error_type: AppErrorType::NotFoundError,
                ..
            } => "The requested item was not found".to_string(),
            AppError {
                message: None,
                error_type: AppErrorType::ApiError { message, .. },
                ..
            } => message.clone(),
            _ => "An unexpected error has occurred".to_string(),
        }
    }

    pub fn network_error(error: impl ToString) -> AppError {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::NetworkError,
            message: Some("Could not reach the Saloneo API".to_string()),
        }
    }

    pub fn api_error(status: u16, message: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::ApiError {
                status,
                message: message.to_string(),
            },
            message: None,
        }
    }

    pub fn storage_error(error: impl ToString) -> AppError {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::StorageError,
            message: Some(error.to_string()),
        }
    }

    pub fn validation_error(error: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::PayloadValidationError,
            message: Some(error.to_string()),
        }
    }

    pub fn template_not_found(template_id: &str) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::TemplateNotFound,
            message: Some(format!("Template `{}` does not exist", template_id)),
        }
    }

    pub fn config_error(error: impl ToString) -> AppError {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::ConfigError,
            message: Some(error.to_string()),
        }
    }

    pub fn internal_error(error: impl ToString) -> AppError {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::InternalError,
            message: Some(error.to_string()),
        }
    }

    /// Replaces the user-facing message, keeping the kind and pushing the
    /// previous message into `cause` when there was none.
    pub fn context(mut self, message: impl ToString) -> AppError {
        if self.cause.is_none() {
            self.cause = Some(self.message());
        }
        self.message = Some(message.to_string());
        self
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return AppError {
                cause: Some(error.to_string()),
                error_type: AppErrorType::JsonParseError,
                message: Some("Unexpected response from the Saloneo API".to_string()),
            };
        }
        match error.status() {
            Some(status) => AppError::api_error(status.as_u16(), error),
            None => AppError::network_error(error),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::JsonParseError,
            message: Some(format!("Failed to parse JSON: {}", error)),
        }
    }
}

impl From<RedisError> for AppError {
    fn from(error: RedisError) -> Self {
        AppError {
            cause: Some(error.to_string()),
            message: Some("Snapshot storage error".to_string()),
            error_type: AppErrorType::StorageError,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::storage_error(error)
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Serialization(e) => AppError::from(e),
            other => AppError::storage_error(other),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} ({})", self.message(), cause),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}
