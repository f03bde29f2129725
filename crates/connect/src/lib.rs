//! Domain model for the analysis-server views client.
//!
//! This crate holds the identifiers, value types, product-version handling and
//! error taxonomy shared by the views client, plus the [`ViewsService`] port.
//! Infrastructure crates implement the port; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ViewId`, `ProjectId`, `ViewName`, `RunId`) |
//! | [`types`] | Value types (`Session`, `ViewCatalog`, `ViewContentsPage`, `PageRequest`, `Fetched`) |
//! | [`version`] | `ProductVersion` parsing and ordering |
//! | [`errors`] | Error, degradation and retry-policy types |
//! | [`ports`] | The `ViewsService` trait |

pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod types;
pub mod version;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ConnectError, DegradeReason, RetryPolicy};
pub use identifiers::{ProjectId, RunId, ViewId, ViewName};
pub use ports::ViewsService;
pub use types::{Fetched, PageRequest, Session, ViewCatalog, ViewContentsPage, ViewDescriptor};
pub use version::{ParseVersionError, ProductVersion};
