//! Newtype domain identifiers.
//!
//! A project scope and a view name are both strings on the wire, and a view id
//! is a plain integer; wrapping each in its own type keeps a [`ProjectId`] from
//! being passed where a [`ViewName`] is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — server-assigned integers
// ---------------------------------------------------------------------------

/// Numeric identifier of a saved view, assigned by the analysis server.
///
/// The server reports ids as JSON integers in the 64-bit signed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ViewId(i64);

impl ViewId {
    /// Creates a new identifier from a raw integer.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (request parameters)
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies the project scope a view is evaluated against.
    ///
    /// Sent verbatim as the `projectId` query parameter.
    ProjectId
}

string_id! {
    /// Key of a saved view, as used in the view-contents URL path.
    ///
    /// Not checked against the server's view listing; an unknown name is
    /// reported by the server, not by the client.
    ViewName
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single CLI invocation.
///
/// Generated fresh for every run and recorded on the root tracing span so all
/// requests from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_ids_reject_empty_values() {
        assert!(ProjectId::new("").is_none());
        assert!(ViewName::new(String::new()).is_none());
        assert_eq!(ProjectId::new("p1").map(|p| p.to_string()), Some("p1".to_string()));
    }

    #[test]
    fn test_view_ids_order_numerically() {
        let mut ids = vec![ViewId::new(10), ViewId::new(-1), ViewId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![ViewId::new(-1), ViewId::new(2), ViewId::new(10)]);
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }
}
