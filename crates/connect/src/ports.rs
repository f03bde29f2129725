//! Port traits implemented by infrastructure crates.

use async_trait::async_trait;

use crate::{ConnectError, Fetched, PageRequest, ViewCatalog, ViewContentsPage};

/// Read access to the saved views of an analysis server.
///
/// Implementations hold whatever session state the server requires; callers
/// drive pagination themselves by calling
/// [`view_contents_outcome`](Self::view_contents_outcome) with advancing
/// offsets.
#[async_trait]
pub trait ViewsService: Send + Sync {
    /// Lists the server's issue views.
    ///
    /// Never fails: anything that prevents a listing yields an empty catalog.
    async fn list_views(&self) -> ViewCatalog;

    /// Fetches one page of a view's contents, keeping a degraded answer
    /// apart from a page the server actually sent.
    ///
    /// A non-200 answer is an error. A malformed request URI or an
    /// unparsable body is [`Fetched::Degraded`].
    async fn view_contents_outcome(
        &self,
        request: &PageRequest,
    ) -> Result<Fetched<ViewContentsPage>, ConnectError>;

    /// Fetches one page of a view's contents.
    ///
    /// A non-200 answer is an error; a malformed request URI or an
    /// unparsable body yields an empty page.
    async fn view_contents_page(
        &self,
        request: &PageRequest,
    ) -> Result<ViewContentsPage, ConnectError> {
        Ok(self.view_contents_outcome(request).await?.into_value())
    }
}
