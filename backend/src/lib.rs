//! Users service library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, ports,
//! and the use-case service; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] provides the in-memory and PostgreSQL stores.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
