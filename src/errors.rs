use std::fmt;

use config::ConfigError;
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    WrongCredentials,
    Network(String),
    Server { status: u16, message: String },
    Decode(String),
    Configuration(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) if msg.is_empty() => write!(f, "Not found"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) if msg.is_empty() => write!(f, "Conflict"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Session expired. Please log in again."),
            AppError::WrongCredentials => write!(f, "Invalid email or password"),
            AppError::Network(msg) => write!(f, "{}", msg),
            AppError::Server { status, message } if message.is_empty() => write!(f, "HTTP {}", status),
            AppError::Server { message, .. } => write!(f, "{}", message),
            AppError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Builds a single-field validation error.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }

    /// Maps a non-2xx response onto the error taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => AppError::UnauthorizedAccess,
            404 => AppError::NotFound(message),
            409 => AppError::Conflict(message),
            _ => AppError::Server { status, message },
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::ValidationError(_))
    }

    /// True for failures that happened on the wire rather than in the client.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Network(_)
                | AppError::Server { .. }
                | AppError::NotFound(_)
                | AppError::Conflict(_)
                | AppError::UnauthorizedAccess
                | AppError::WrongCredentials
                | AppError::Decode(_)
        )
    }

    /// Message suitable for an error banner, or `None` when the failure
    /// carried nothing readable and the caller should use its fallback text.
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            AppError::ValidationError(errors) => errors.first().map(|e| e.message.clone())?,
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Network(msg)
            | AppError::Server { message: msg, .. } => msg.clone(),
            _ => self.to_string(),
        };

        let message = message.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::ValidationError(errors) => errors,
            _ => &[],
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // field_errors() is a map; keep the banner stable between runs
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AppError::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => AppError::from_status(status.as_u16(), String::new()),
            None => AppError::Network(format!("Network error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Configuration(format!("Invalid URL: {}", err))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[display("{message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
