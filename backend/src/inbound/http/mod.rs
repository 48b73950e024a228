//! HTTP inbound adapter exposing the REST endpoints.

pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod travel_orders;
pub mod users;

use actix_web::{HttpRequest, web};

use crate::domain::Error;

pub use error::ApiResult;

fn malformed(err: impl std::fmt::Display, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("The request could not be parsed: {err}")).into()
}

/// JSON extractor settings mapping malformed bodies to `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| malformed(err, req))
}

/// Query extractor settings mapping malformed query strings to
/// `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| malformed(err, req))
}
