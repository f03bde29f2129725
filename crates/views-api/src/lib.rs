//! Views JSON API client adapter.
//!
//! Implements the [`connect::ViewsService`] trait over the analysis server's
//! JSON HTTP API. A [`ViewsClient`] establishes a cookie session when it is
//! constructed, lists saved issue views, and fetches view contents one page
//! at a time.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URI construction, cookie handling, status checks and
//! JSON envelope parsing all live here. The [`connect`] crate sees only
//! [`connect::ViewsService`].
//!
//! ## Endpoints
//!
//! | Request | Purpose |
//! |---------|---------|
//! | `GET <base>/api/views/v1` | session bootstrap and view listing |
//! | `GET <base>/api/viewContents/issues/v1/<view>?projectId=&rowCount=&offset=` | one page of view contents (session cookies attached) |
//!
//! ## Failure policy
//!
//! - Bootstrap answered with a non-200 status: construction fails.
//! - View contents answered with a non-200 status: the call fails with the
//!   URI, status and body.
//! - Malformed request URI or unparsable body: the call returns an empty
//!   value and logs a warning. [`ViewsClient::list_views_outcome`] and
//!   [`ViewsClient::view_contents_outcome`] report the reason explicitly.

pub mod client;
pub mod endpoint;
pub mod transport;
mod wire;

pub use client::{ViewsClient, ViewsClientConfig};
pub use endpoint::EndpointError;
pub use transport::{
    HttpResponse, HttpTransport, ReqwestTransport, TransportConfig, TransportError,
    DEFAULT_USER_AGENT,
};
