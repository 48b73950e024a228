//! Travel order booking backend.
//!
//! Users book trips, approve or cancel them and browse their own orders
//! through a JSON API. The crate follows a hexagonal layout: [`domain`]
//! holds the rules and ports, [`inbound`] and [`outbound`] hold the adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
