//! Request URI construction for the views JSON API.
//!
//! Endpoint paths are appended to whatever path the base URL already has, so a
//! server mounted below a prefix (`https://host/coverity/`) works unchanged.

use connect::PageRequest;
use thiserror::Error;
use url::Url;

/// Path of the view listing, also used to bootstrap the session.
const VIEWS_PATH: [&str; 3] = ["api", "views", "v1"];

/// Path prefix of the issue view-contents endpoint; the view name follows.
///
/// `viewContentsV1` is only the key of the response envelope, never a path
/// segment.
const VIEW_CONTENTS_PATH: [&str; 4] = ["api", "viewContents", "issues", "v1"];

/// The base URL and an endpoint path did not form a request URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("invalid base URL '{base}': {source}")]
    InvalidBase {
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL '{0}' cannot carry a path")]
    CannotBeABase(String),
}

/// `<base>/api/views/v1`
pub fn views(base: &str) -> Result<Url, EndpointError> {
    with_path(base, &VIEWS_PATH)
}

/// `<base>/api/viewContents/issues/v1/<view>?projectId=..&rowCount=..&offset=..`
///
/// The view name is percent-encoded as a single path segment.
pub fn view_contents(base: &str, request: &PageRequest) -> Result<Url, EndpointError> {
    let mut url = with_path(base, &VIEW_CONTENTS_PATH)?;
    url.path_segments_mut()
        .map_err(|()| EndpointError::CannotBeABase(base.to_string()))?
        .push(request.view_name.as_str());
    url.query_pairs_mut()
        .append_pair("projectId", request.project_id.as_str())
        .append_pair("rowCount", &request.page_size().to_string())
        .append_pair("offset", &request.offset.to_string());
    Ok(url)
}

fn with_path(base: &str, segments: &[&str]) -> Result<Url, EndpointError> {
    let mut url = Url::parse(base).map_err(|source| EndpointError::InvalidBase {
        base: base.to_string(),
        source,
    })?;
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| EndpointError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use connect::{ProjectId, ViewName};

    use super::*;

    fn request(view: &str, page_size: u32, offset: u64) -> PageRequest {
        PageRequest::new(
            ProjectId::new("p1").unwrap(),
            ViewName::new(view).unwrap(),
            page_size,
            offset,
        )
        .unwrap()
    }

    #[test]
    fn test_views_endpoint_with_and_without_trailing_slash() {
        assert_eq!(
            views("http://connect:8080").unwrap().as_str(),
            "http://connect:8080/api/views/v1"
        );
        assert_eq!(
            views("http://connect:8080/").unwrap().as_str(),
            "http://connect:8080/api/views/v1"
        );
    }

    #[test]
    fn test_views_endpoint_keeps_base_path_prefix() {
        assert_eq!(
            views("https://host/coverity/").unwrap().as_str(),
            "https://host/coverity/api/views/v1"
        );
    }

    #[test]
    fn test_view_contents_query_parameters() {
        let url = view_contents("http://connect:8080", &request("v", 50, 100)).unwrap();
        assert_eq!(url.path(), "/api/viewContents/issues/v1/v");
        assert_eq!(url.query(), Some("projectId=p1&rowCount=50&offset=100"));
    }

    #[test]
    fn test_view_name_is_a_single_encoded_segment() {
        let url = view_contents("http://connect:8080", &request("My Views/High", 10, 0)).unwrap();
        assert_eq!(url.path(), "/api/viewContents/issues/v1/My%20Views%2FHigh");
    }

    #[test]
    fn test_malformed_base_urls_are_rejected() {
        assert!(matches!(views("not a url"), Err(EndpointError::InvalidBase { .. })));
        assert!(matches!(views("http://"), Err(EndpointError::InvalidBase { .. })));
        assert!(matches!(views("mailto:ops@example.com"), Err(EndpointError::CannotBeABase(_))));
    }
}
