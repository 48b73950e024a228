//! Success envelope shared by every JSON endpoint.
//!
//! ```text
//! {"status": "success", "data": {...}}
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Wire shape of every successful JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Always `"success"`.
    pub status: String,
    /// Endpoint-specific payload.
    pub data: T,
}

impl<T> SuccessEnvelope<T> {
    /// Wrap `data`.
    pub fn new(data: T) -> Self {
        Self {
            status: "success".to_owned(),
            data,
        }
    }
}

/// Respond with `status` and `data` wrapped in the success envelope.
pub fn respond<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(SuccessEnvelope::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn wraps_payload_under_data() {
        let response = respond(StatusCode::CREATED, json!({"travelOrder": {"id": "x"}}));
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body()).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(
            body,
            json!({"status": "success", "data": {"travelOrder": {"id": "x"}}})
        );
    }
}
