//! Shared value types for the views client.
//!
//! [`ViewContentsPage`] deliberately does not model individual issue rows: the
//! server's row schema changes between releases, and callers that drive a
//! pagination loop only need the row list and the total count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DegradeReason, ProjectId, ViewId, ViewName};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Cookies issued by the server during session bootstrap.
///
/// Captured once when a client is constructed and never mutated afterwards.
/// An empty session is valid: requests then go out unauthenticated and the
/// server decides whether to reject them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    cookies: BTreeMap<String, String>,
}

impl Session {
    /// Creates an empty session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the value of the named cookie, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Returns the number of cookies held.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns `true` if no cookies are held.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the cookie names, for logging without leaking values.
    pub fn names(&self) -> Vec<&str> {
        self.cookies.keys().map(String::as_str).collect()
    }

    /// Renders the session as a `Cookie` request header value
    /// (`name=value; name=value`). Returns `None` for an empty session.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(pairs.join("; "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Session {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cookies: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// One saved issue view as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    /// Server-assigned numeric identifier.
    pub id: ViewId,
    /// Display name; also the key used to fetch the view's contents.
    pub name: String,
}

/// The issue views available on the server, keyed by view id.
///
/// Only views of type `"issues"` are ever present. Id uniqueness comes from
/// the server; a duplicate id keeps the last name reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCatalog {
    views: BTreeMap<ViewId, String>,
}

impl ViewCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a view, replacing any earlier entry with the same id.
    pub fn insert(&mut self, id: ViewId, name: impl Into<String>) {
        self.views.insert(id, name.into());
    }

    /// Returns the name of the view with the given id.
    pub fn get(&self, id: ViewId) -> Option<&str> {
        self.views.get(&id).map(String::as_str)
    }

    /// Returns the id of the first view with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<ViewId> {
        self.views
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// Returns the number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if the catalog holds no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Iterates over the views in id order.
    pub fn descriptors(&self) -> impl Iterator<Item = ViewDescriptor> + '_ {
        self.views.iter().map(|(id, name)| ViewDescriptor {
            id: *id,
            name: name.clone(),
        })
    }
}

impl FromIterator<ViewDescriptor> for ViewCatalog {
    fn from_iter<I: IntoIterator<Item = ViewDescriptor>>(iter: I) -> Self {
        Self {
            views: iter.into_iter().map(|v| (v.id, v.name)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// View contents
// ---------------------------------------------------------------------------

/// One page of a view's contents, exactly as the server returned it.
///
/// Wraps the `viewContentsV1` object of the response. Nothing inside it is
/// reinterpreted; [`Self::rows`] and [`Self::total_rows`] are read-only views
/// over the `rows` and `totalRows` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewContentsPage(Map<String, Value>);

impl ViewContentsPage {
    /// Wraps a server payload.
    pub fn new(payload: Map<String, Value>) -> Self {
        Self(payload)
    }

    /// Creates a page wrapping an empty object.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the wrapped object has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the wrapped payload.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the page, returning the wrapped payload.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Returns the value of a top-level key of the payload.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the issue rows, if the payload carries a `rows` array.
    pub fn rows(&self) -> Option<&[Value]> {
        self.0.get("rows").and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Returns the server's total row count, if reported as `totalRows`.
    pub fn total_rows(&self) -> Option<u64> {
        self.0.get("totalRows").and_then(Value::as_u64)
    }
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

/// Parameters for one view-contents request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Project scope the view is evaluated against.
    pub project_id: ProjectId,
    /// View whose contents are requested.
    pub view_name: ViewName,
    page_size: u32,
    /// Zero-based row offset.
    pub offset: u64,
}

impl PageRequest {
    /// Creates a request, returning `None` if `page_size` is zero.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        view_name: ViewName,
        page_size: u32,
        offset: u64,
    ) -> Option<Self> {
        if page_size == 0 {
            return None;
        }
        Some(Self {
            project_id,
            view_name,
            page_size,
            offset,
        })
    }

    /// Maximum number of rows requested (always positive).
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the request for the page following one that returned
    /// `rows_returned` rows, or `None` if the offset would overflow.
    #[must_use]
    pub fn next(&self, rows_returned: u64) -> Option<Self> {
        let offset = self.offset.checked_add(rows_returned)?;
        Some(Self {
            offset,
            ..self.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a call that can come back without data but without an error.
///
/// `Degraded` covers a malformed request URI or an unparsable response body.
/// Callers that want the plain "empty means try later" behaviour use
/// [`Fetched::into_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The server answered and the answer was understood.
    Data(T),
    /// No data could be obtained; `reason` says why.
    Degraded {
        /// Why no data was produced.
        reason: DegradeReason,
    },
}

impl<T: Default> Fetched<T> {
    /// Returns the data, or the empty value when degraded.
    pub fn into_value(self) -> T {
        match self {
            Self::Data(value) => value,
            Self::Degraded { .. } => T::default(),
        }
    }
}

impl<T> Fetched<T> {
    /// Returns `true` if no data was obtained.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Returns the degradation reason, if any.
    pub fn reason(&self) -> Option<&DegradeReason> {
        match self {
            Self::Data(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }
}
