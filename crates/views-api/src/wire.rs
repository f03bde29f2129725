//! JSON response envelopes of the views API.

use connect::{ViewCatalog, ViewContentsPage, ViewId};
use serde::Deserialize;
use serde_json::{Map, Value};

/// View type whose views are exposed to callers.
const ISSUES_VIEW_TYPE: &str = "issues";

#[derive(Debug, Deserialize)]
struct ViewsEnvelope {
    views: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ViewContentsEnvelope {
    #[serde(rename = "viewContentsV1")]
    view_contents: Map<String, Value>,
}

/// Parses a view listing, keeping issue views that have an id and a name.
///
/// Entries are read leniently: an entry of another type, or one whose `id` is
/// not an integer or whose `name` is not a string, is skipped. Only a body
/// that is not JSON or has no `views` array is an error.
pub(crate) fn parse_views(body: &str) -> Result<ViewCatalog, serde_json::Error> {
    let envelope: ViewsEnvelope = serde_json::from_str(body)?;

    let catalog = envelope
        .views
        .iter()
        .filter(|view| view.get("type").and_then(Value::as_str) == Some(ISSUES_VIEW_TYPE))
        .filter_map(|view| {
            let id = view.get("id").and_then(Value::as_i64)?;
            let name = view.get("name").and_then(Value::as_str)?;
            Some(connect::ViewDescriptor {
                id: ViewId::new(id),
                name: name.to_string(),
            })
        })
        .collect();

    Ok(catalog)
}

/// Unwraps the `viewContentsV1` object of a view-contents response.
pub(crate) fn parse_view_contents(body: &str) -> Result<ViewContentsPage, serde_json::Error> {
    let envelope: ViewContentsEnvelope = serde_json::from_str(body)?;
    Ok(ViewContentsPage::new(envelope.view_contents))
}
