//! The views client: session bootstrap, view listing, and paged contents.

use async_trait::async_trait;
use connect::{
    ConnectError, DegradeReason, Fetched, PageRequest, Session, ViewCatalog, ViewContentsPage,
    ViewsService,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::endpoint;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::wire;

/// Behaviour switches for [`ViewsClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewsClientConfig {
    /// Send the session cookies with view-listing requests too.
    ///
    /// Off by default: listings go out without cookies and only
    /// view-contents requests carry the session.
    pub attach_session_to_listing: bool,
}

/// Client for the views JSON API of an analysis server.
///
/// Construction performs one request to establish a session; the cookies it
/// returns are kept for the lifetime of the client and replayed on
/// view-contents requests. The session is never refreshed.
#[derive(Debug)]
pub struct ViewsClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
    session: Session,
    config: ViewsClientConfig,
}

impl<T: HttpTransport> ViewsClient<T> {
    /// Connects to the server at `base_url` and establishes a session.
    ///
    /// Fails if the bootstrap request cannot be sent or is answered with a
    /// status other than 200. A `base_url` that cannot form a request URI is
    /// not an error: the client is built with an empty session and every
    /// later call degrades to an empty result.
    #[instrument(skip(transport, config))]
    pub async fn connect(
        base_url: &str,
        transport: T,
        config: ViewsClientConfig,
    ) -> Result<Self, ConnectError> {
        let session = match endpoint::views(base_url) {
            Ok(uri) => bootstrap_session(&transport, &uri).await?,
            Err(e) => {
                warn!(error = %e, "cannot build session URI; continuing without a session");
                Session::empty()
            }
        };

        Ok(Self {
            base_url: base_url.to_string(),
            transport,
            session,
            config,
        })
    }

    /// The base URL the client was built with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The cookies captured during construction.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The behaviour switches the client was built with.
    pub fn config(&self) -> &ViewsClientConfig {
        &self.config
    }

    /// Lists the issue views, reporting why when no listing was obtained.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn list_views_outcome(&self) -> Fetched<ViewCatalog> {
        let uri = match endpoint::views(&self.base_url) {
            Ok(uri) => uri,
            Err(e) => {
                return degraded(DegradeReason::UriConstruction {
                    message: e.to_string(),
                })
            }
        };

        let cookies = self
            .config
            .attach_session_to_listing
            .then_some(&self.session);
        let response = match self.transport.get(&uri, cookies).await {
            Ok(response) => response,
            Err(e) => {
                return degraded(DegradeReason::Transport {
                    message: e.to_string(),
                })
            }
        };

        if response.status != 200 {
            return degraded(DegradeReason::UnexpectedStatus {
                status: response.status,
            });
        }

        match wire::parse_views(&response.body) {
            Ok(catalog) => {
                debug!(views = catalog.len(), "listed issue views");
                Fetched::Data(catalog)
            }
            Err(e) => degraded(DegradeReason::ResponseParse {
                message: e.to_string(),
            }),
        }
    }

    /// Fetches one page of a view's contents, reporting why when the page is
    /// empty for lack of data.
    ///
    /// Non-200 answers and transport failures are errors.
    #[instrument(
        skip(self, request),
        fields(
            project = %request.project_id,
            view = %request.view_name,
            offset = request.offset,
            page_size = request.page_size(),
        )
    )]
    pub async fn view_contents_outcome(
        &self,
        request: &PageRequest,
    ) -> Result<Fetched<ViewContentsPage>, ConnectError> {
        let uri = match endpoint::view_contents(&self.base_url, request) {
            Ok(uri) => uri,
            Err(e) => {
                return Ok(degraded(DegradeReason::UriConstruction {
                    message: e.to_string(),
                }))
            }
        };
        info!(uri = %uri, "retrieving view contents");

        let response = self
            .transport
            .get(&uri, Some(&self.session))
            .await
            .map_err(|e| ConnectError::Transport {
                uri: uri.to_string(),
                message: e.to_string(),
            })?;

        if response.status != 200 {
            return Err(ConnectError::RemoteCallFailure {
                uri: uri.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        Ok(match wire::parse_view_contents(&response.body) {
            Ok(page) => {
                debug!(
                    rows = ?page.rows().map(<[_]>::len),
                    total_rows = ?page.total_rows(),
                    "received view contents page"
                );
                Fetched::Data(page)
            }
            Err(e) => degraded(DegradeReason::ResponseParse {
                message: e.to_string(),
            }),
        })
    }
}

#[async_trait]
impl<T: HttpTransport> ViewsService for ViewsClient<T> {
    async fn list_views(&self) -> ViewCatalog {
        self.list_views_outcome().await.into_value()
    }

    async fn view_contents_outcome(
        &self,
        request: &PageRequest,
    ) -> Result<Fetched<ViewContentsPage>, ConnectError> {
        ViewsClient::view_contents_outcome(self, request).await
    }
}

async fn bootstrap_session<T: HttpTransport>(
    transport: &T,
    uri: &Url,
) -> Result<Session, ConnectError> {
    debug!(uri = %uri, "initializing session");

    let HttpResponse {
        status, cookies, ..
    } = transport
        .get(uri, None)
        .await
        .map_err(|e| ConnectError::Transport {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;

    if status != 200 {
        return Err(ConnectError::InitializationFailure {
            uri: uri.to_string(),
            status,
        });
    }

    debug!(cookies = ?cookies.names(), "session established");
    Ok(cookies)
}

fn degraded<V>(reason: DegradeReason) -> Fetched<V> {
    warn!(reason = %reason, "no data returned");
    Fetched::Degraded { reason }
}
