//! Failure type shared by every document-store port.

use tracing::{error, warn};

use super::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Errors raised by document-store adapters.
    pub enum StoreError {
        /// The store could not be reached or its state is unusable.
        Connection { message: String } => "document store unavailable: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "document store query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Conflict { message: String } => "document store conflict: {message}",
    }
}

/// Translate a store failure into the domain taxonomy.
///
/// Connection failures are retryable by the caller; everything else is an
/// internal error whose detail stays in the logs.
pub fn map_store_error(err: StoreError) -> Error {
    match err {
        StoreError::Connection { message } => {
            warn!(%message, "document store unavailable");
            Error::service_unavailable("document store unavailable")
        }
        StoreError::Query { message } | StoreError::Conflict { message } => {
            error!(%message, "document store operation failed");
            Error::internal("document store operation failed")
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::connection("lock poisoned"), ErrorCode::ServiceUnavailable)]
    #[case(StoreError::query("bad filter"), ErrorCode::InternalError)]
    #[case(StoreError::conflict("duplicate token"), ErrorCode::InternalError)]
    fn maps_to_domain_codes(#[case] err: StoreError, #[case] expected: ErrorCode) {
        assert_eq!(map_store_error(err).code(), expected);
    }

    #[rstest]
    fn mapped_messages_hide_adapter_detail() {
        let mapped = map_store_error(StoreError::query("SELECT secret"));
        assert!(!mapped.message().contains("secret"));
    }
}
