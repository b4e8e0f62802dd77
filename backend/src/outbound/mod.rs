//! Outbound adapters implementing the domain ports.
//!
//! - **identity**: HTTP client for the external session-data endpoint
//! - **memory**: process-local document store behind every storage port
//!
//! Adapters translate between domain types and infrastructure shapes and
//! carry no business rules.

pub mod identity;
pub mod memory;
