//! Handle relay library: resolves social-network handles to account ids.
//!
//! The crate is laid out as a small hexagon:
//! - [`domain`] owns the handle rules, the relay use case and its ports;
//! - [`inbound`] exposes the use case over HTTP;
//! - [`outbound`] talks to the external user directory;
//! - [`settings`] resolves startup configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
