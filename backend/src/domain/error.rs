//! Domain-level error types.
//!
//! Errors are transport agnostic. The HTTP adapter maps each [`ErrorCode`] to
//! a status code and serializes the payload as the response body.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Response header carrying the request correlation identifier.
pub const TRACE_ID_HEADER: &str = "Trace-Id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No valid session accompanies the request.
    Unauthorized,
    /// The identity provider rejected the external session identifier.
    InvalidExternalSession,
    /// The caller is authenticated but lacks access to the resource.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// A pending invite already exists for the same baby and invitee.
    DuplicateInvite,
    /// The invite has left the pending state.
    AlreadyProcessed,
    /// A collaborator (store, identity provider) is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "not authenticated",
            Self::InvalidExternalSession => "invalid session",
            Self::Forbidden => "access denied",
            Self::NotFound => "not found",
            Self::DuplicateInvite => "invite already sent",
            Self::AlreadyProcessed => "invite already processed",
            Self::ServiceUnavailable => "service unavailable",
            Self::InternalError => "internal server error",
        }
    }
}

/// Error payload returned by every fallible domain operation.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
///
/// # Examples
/// ```
/// use daybook::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("baby not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "baby_id must be a UUID")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create an error, substituting a generic message when `message` is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match Self::try_new(code, message) {
            Ok(error) => error,
            Err(ErrorValidationError::EmptyMessage) => Self {
                code,
                message: code.fallback_message().to_owned(),
                trace_id: TraceId::current().map(|id| id.to_string()),
                details: None,
            },
        }
    }

    /// Fallible constructor that rejects blank messages.
    ///
    /// The trace identifier in scope, if any, is captured automatically.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation id, when raised inside a traced request.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Extra structured context.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details, e.g. the offending field name.
    ///
    /// # Examples
    /// ```
    /// use daybook::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Malformed input (400).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Missing or invalid credentials (401).
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Identity provider refused the external session (401).
    pub fn invalid_external_session(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidExternalSession, message)
    }

    /// Authenticated but not allowed (403).
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Resource does not exist (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// A pending invite already exists (400).
    pub fn duplicate_invite(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateInvite, message)
    }

    /// Invite is no longer pending (400).
    pub fn already_processed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyProcessed, message)
    }

    /// A dependency is unreachable (503).
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Unexpected failure; redacted over HTTP (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
