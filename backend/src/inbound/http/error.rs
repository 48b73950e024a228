//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning domain
//! failures into the `{"status": "error", ...}` envelope with consistent
//! status codes. Field errors and conflicting orders carried in the error
//! details are lifted to the top-level `errors` and `conflicts` keys.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const ERRORS_KEY: &str = "errors";
const CONFLICTS_KEY: &str = "conflicts";

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `"error"`.
    #[schema(example = "error")]
    pub status: String,
    /// Stable machine-readable error code.
    #[schema(value_type = crate::inbound::http::schemas::ErrorCodeSchema)]
    pub code: ErrorCode,
    /// Human-readable summary.
    #[schema(example = "The given data was invalid.")]
    pub message: String,
    /// Field name to validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<Value>,
    /// Orders blocking a booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub conflicts: Option<Value>,
    /// Any other structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    /// Correlation identifier of the failed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub trace_id: Option<String>,
}

fn split_details(details: Option<&Value>) -> (Option<Value>, Option<Value>, Option<Value>) {
    let Some(Value::Object(map)) = details else {
        return (None, None, details.cloned());
    };
    let mut rest: Map<String, Value> = map.clone();
    let errors = rest.remove(ERRORS_KEY);
    let conflicts = rest.remove(CONFLICTS_KEY);
    let rest = (!rest.is_empty()).then_some(Value::Object(rest));
    (errors, conflicts, rest)
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        let (errors, conflicts, details) = split_details(error.details());
        Self {
            status: "error".to_owned(),
            code: error.code(),
            message: error.message().to_owned(),
            errors,
            conflicts,
            details,
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::InvalidTransition => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error!(message = error.message(), trace_id = ?error.trace_id(), "internal error");
        let redacted = Error::internal("Internal server error");
        match error.trace_id() {
            Some(id) => redacted.with_trace_id(id.to_owned()),
            None => redacted,
        }
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorEnvelope::from(&redact_if_internal(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
