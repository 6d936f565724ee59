//! Employee and project tracking service.
//!
//! The crate is split hexagonally: `domain` owns entities, rules, and ports;
//! `inbound::http` adapts them to actix-web; `outbound::persistence`
//! implements the driven ports over PostgreSQL with Diesel.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
