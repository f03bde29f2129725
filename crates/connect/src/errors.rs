//! Error, degradation, and retry-policy types for the views client.
//!
//! Two failure families exist and they are kept apart on purpose:
//!
//! - [`ConnectError`] is returned to the caller. It covers a failed session
//!   bootstrap, a non-200 answer to a view-contents request, and transport
//!   failures.
//! - [`DegradeReason`] describes a call that produced no data but is not an
//!   error from the caller's point of view (malformed request URI, unparsable
//!   body). Operations that degrade return an empty value; the reason is
//!   logged and is available through the outcome API
//!   ([`crate::Fetched`]).
//!
//! [`RetryPolicy`] lets callers decide whether re-issuing a failed call makes
//! sense. The client itself never retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry.
///
/// - `Retryable`: transport failures, 5xx responses, 429 responses.
/// - `NonRetryable`: authorisation failures, unknown views, bad configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means the caller
        /// applies its own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried without intervention.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Caller-visible errors
// ---------------------------------------------------------------------------

/// Errors surfaced to callers of the views client.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectError {
    /// The session bootstrap request did not return HTTP 200.
    ///
    /// Fatal to client construction; no partially usable client is produced.
    #[error("Initializing session failed: GET {uri} returned a response status of {status}")]
    InitializationFailure {
        /// The bootstrap URI that was requested.
        uri: String,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// A view-contents request returned a status other than 200.
    #[error("GET {uri} returned a response status of {status}: {body}")]
    RemoteCallFailure {
        /// The fully built request URI, including the query string.
        uri: String,
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body text, kept for diagnosis.
        body: String,
    },

    /// The request could not be sent or its response could not be read.
    #[error("Transport failure for GET {uri}: {message}")]
    Transport {
        /// The URI being requested.
        uri: String,
        /// Description of the transport failure.
        message: String,
    },

    /// Client or CLI configuration is invalid.
    #[error("Configuration error: {message}")]
    InvalidConfiguration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ConnectError {
    /// Returns whether re-issuing the failed call could succeed.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Transport { .. } => RetryPolicy::Retryable { after: None },
            Self::InitializationFailure { status, .. } | Self::RemoteCallFailure { status, .. }
                if *status == 429 || (500..600).contains(status) =>
            {
                RetryPolicy::Retryable { after: None }
            }
            _ => RetryPolicy::NonRetryable,
        }
    }
}

// ---------------------------------------------------------------------------
// Degraded outcomes
// ---------------------------------------------------------------------------

/// Why an operation returned an empty value instead of server data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegradeReason {
    /// The base URL and endpoint path did not form a valid request URI.
    #[error("request URI could not be constructed: {message}")]
    UriConstruction {
        /// Parser message for the offending URL.
        message: String,
    },

    /// The response body was not valid JSON or lacked the expected keys.
    #[error("response could not be parsed: {message}")]
    ResponseParse {
        /// Parser message.
        message: String,
    },

    /// The view listing returned a status other than 200.
    ///
    /// Only the listing degrades on status; view-contents requests raise
    /// [`ConnectError::RemoteCallFailure`] instead.
    #[error("unexpected response status {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The listing request failed at the transport level.
    #[error("transport failure: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}
