//! Identity provider adapter.

mod dto;
mod http_provider;

pub use http_provider::{HttpIdentityProvider, SESSION_ID_HEADER};
