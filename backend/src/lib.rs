//! Infant care day book service.
//!
//! Parents and invited collaborators record feedings, sleeps, diaper changes,
//! and growth for a baby, then read back merged timelines, daily totals, and a
//! nap forecast. The crate follows a hexagonal layout: [`domain`] holds the
//! rules and ports, [`inbound`] the HTTP adapter, and [`outbound`] the store
//! and identity provider adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
