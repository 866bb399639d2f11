use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP status used when a refresh value is unknown or does not match the stored one.
pub const STATUS_INVALID_REFRESH: u16 = 498;

/// HTTP status used when a refresh exchange is attempted without a refresh value.
pub const STATUS_TOKEN_REQUIRED: u16 = 499;

pub const ERR_USER_CREDENTIALS: &str = "ERR_USER_CREDENTIALS";
pub const ERR_USER_EXISTS: &str = "ERR_USER_EXISTS";
pub const ERR_PWD_CONFIRM: &str = "ERR_PWD_CONFIRM";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub property: String,
    pub message: String,
}

impl FieldError {
    pub fn new(property: &str, message: impl Into<String>) -> Self {
        Self {
            property: property.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    UnprocessableEntity {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("ERR_INVALID_REFRESH")]
    InvalidRefresh,

    #[error("ERR_TOKEN_REQUIRED")]
    TokenRequired,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden("Forbidden".to_string())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity {
            message: msg.into(),
            details: Vec::new(),
        }
    }

    pub fn invalid(details: Vec<FieldError>) -> Self {
        ApiError::UnprocessableEntity {
            message: "validation failed".to_string(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidRefresh => {
                StatusCode::from_u16(STATUS_INVALID_REFRESH).unwrap_or(StatusCode::UNAUTHORIZED)
            }
            ApiError::TokenRequired => {
                StatusCode::from_u16(STATUS_TOKEN_REQUIRED).unwrap_or(StatusCode::BAD_REQUEST)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Forbidden(_) => "Forbidden",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::UnprocessableEntity { .. } => "UnprocessableEntityError",
            ApiError::InvalidRefresh => "InvalidRefresh",
            ApiError::TokenRequired => "TokenRequired",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

/// Wire shape of every error response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub name: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let name = self.name().to_string();
        let message = match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = %format!("{:#}", err), "request failed");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        let details = match self {
            ApiError::UnprocessableEntity { details, .. } => details,
            _ => Vec::new(),
        };
        let body = ErrorBody {
            status: status.as_u16(),
            name,
            message,
            details,
        };
        (status, Json(body)).into_response()
    }
}
