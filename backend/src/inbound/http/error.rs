//! Error formatter for the HTTP adapter.
//!
//! Purpose: give every failure a single exit. Handler errors, body extractor
//! errors and the unmatched-route fallback all end in [`handle_error`], so
//! clients always see `{ "status": <code>, "message": <text> }`.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::TraceId;
use crate::domain::ports::DataAccessError;

/// Message returned for unmatched routes.
pub const PAGE_NOT_FOUND: &str = "Page not found!";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// HTTP status code, repeated from the status line.
    #[schema(example = 404)]
    pub status: u16,
    /// Human-readable failure description.
    #[schema(example = "Page not found!")]
    pub message: String,
}

/// Failure leaving an HTTP handler.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use data_api::inbound::http::error::ApiError;
///
/// let err = ApiError::new(StatusCode::IM_A_TEAPOT, "short and stout");
/// assert_eq!(err.status(), StatusCode::IM_A_TEAPOT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Build an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Translate a port failure, using `fallback` when the failure carries no
    /// usable status.
    #[must_use]
    pub fn from_port(error: &DataAccessError, fallback: StatusCode) -> Self {
        let status = error
            .status()
            .filter(|code| (100..600).contains(code))
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(fallback);
        Self::new(status, error.to_string())
    }

    /// Error used by the unmatched-route fallback.
    #[must_use]
    pub fn page_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, PAGE_NOT_FOUND)
    }

    /// Status code sent to the client.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message sent to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        handle_error(self.status, self.message.as_str())
    }
}

/// Emit the uniform error response for `status` and `message`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use data_api::inbound::http::error::handle_error;
///
/// let response = handle_error(StatusCode::NOT_FOUND, "Page not found!");
/// assert_eq!(response.status(), StatusCode::NOT_FOUND);
/// ```
pub fn handle_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    let trace_id = TraceId::current().map(|id| id.to_string());
    let code = status.as_u16();
    if status.is_server_error() {
        error!(status = code, trace_id = trace_id.as_deref(), %message, "request failed");
    } else {
        warn!(status = code, trace_id = trace_id.as_deref(), %message, "request rejected");
    }

    HttpResponse::build(status).json(ErrorBody {
        status: code,
        message,
    })
}

/// Route JSON body extraction failures through the error formatter.
///
/// Bodies are parsed as JSON whatever `Content-Type` the client sent.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_payload_error)
}

fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::new(StatusCode::BAD_REQUEST, format!("invalid JSON body: {err}")).into()
}
