//! Plain acknowledgement bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain `{message}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Baby profile deleted")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
