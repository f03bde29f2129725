//! Subcommand implementations.

use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context};
use connect::{
    ConnectError, Fetched, PageRequest, ProductVersion, ProjectId, ViewName, ViewsService,
};
use serde_json::Value;
use tracing::{debug, info, warn};
use views_api::{ReqwestTransport, TransportConfig, ViewsClient, ViewsClientConfig};

use crate::args::{Cli, Command};

pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Views => {
            let client = connect_client(cli).await?;
            list_views(&client).await
        }
        Command::Contents {
            project,
            view,
            page_size,
            offset,
            all,
        } => {
            let request = page_request(project, view, *page_size, *offset)?;
            let client = connect_client(cli).await?;
            if *all {
                let mut stdout = std::io::stdout().lock();
                let rows = drain_view(&client, request, |row| {
                    writeln!(stdout, "{row}").context("writing row")
                })
                .await?;
                info!(rows, "view drained");
                Ok(())
            } else {
                let page = client.view_contents_page(&request).await?;
                println!("{}", serde_json::to_string_pretty(page.payload())?);
                Ok(())
            }
        }
        Command::CheckVersion { server, analysis } => {
            check_version(server, analysis.as_deref())
        }
    }
}

async fn connect_client(cli: &Cli) -> anyhow::Result<ViewsClient> {
    let url = cli
        .url
        .as_deref()
        .ok_or_else(|| ConnectError::InvalidConfiguration {
            message: "a server URL is required (--url or CONNECT_URL)".to_string(),
        })?;

    let transport_config =
        TransportConfig::default().with_timeout(Duration::from_secs(cli.timeout_secs));
    let transport = ReqwestTransport::new(&transport_config).context("building HTTP transport")?;
    let config = ViewsClientConfig {
        attach_session_to_listing: cli.session_on_listing,
    };

    ViewsClient::connect(url, transport, config)
        .await
        .with_context(|| format!("connecting to {url}"))
}

fn page_request(
    project: &str,
    view: &str,
    page_size: u32,
    offset: u64,
) -> anyhow::Result<PageRequest> {
    let invalid = |message: &str| ConnectError::InvalidConfiguration {
        message: message.to_string(),
    };
    let project_id = ProjectId::new(project).ok_or_else(|| invalid("project must not be empty"))?;
    let view_name = ViewName::new(view).ok_or_else(|| invalid("view must not be empty"))?;
    let request = PageRequest::new(project_id, view_name, page_size, offset)
        .ok_or_else(|| invalid("page size must be positive"))?;
    Ok(request)
}

async fn list_views(service: &dyn ViewsService) -> anyhow::Result<()> {
    let views = service.list_views().await;
    if views.is_empty() {
        warn!("server reported no issue views");
    }
    for view in views.descriptors() {
        println!("{}\t{}", view.id, view.name);
    }
    Ok(())
}

/// Fetches pages from `first` onwards and hands every row to `sink`.
/// Returns the number of rows delivered.
///
/// The view counts as drained when the offset reaches the last `totalRows`
/// reported. Without a `totalRows`, it counts as drained at the first page
/// holding fewer rows than requested. Anything else that ends the loop is an
/// error: a degraded page, running out of rows below the reported total, a
/// server repeating the previous page, or an offset overflow.
pub async fn drain_view<F>(
    service: &dyn ViewsService,
    first: PageRequest,
    mut sink: F,
) -> anyhow::Result<u64>
where
    F: FnMut(&Value) -> anyhow::Result<()>,
{
    let mut request = first;
    let mut delivered = 0u64;
    let mut expected_total: Option<u64> = None;
    let mut previous_rows: Option<Vec<Value>> = None;

    loop {
        let page = match service.view_contents_outcome(&request).await? {
            Fetched::Data(page) => page,
            Fetched::Degraded { reason } => bail!(
                "page at offset {} could not be read after {delivered} rows: {reason}",
                request.offset
            ),
        };
        if let Some(total) = page.total_rows() {
            expected_total = Some(total);
        }

        let rows = page.rows().unwrap_or_default();
        if rows.is_empty() {
            if let Some(total) = expected_total.filter(|total| request.offset < *total) {
                bail!(
                    "view ended at offset {} but the server reported {total} rows",
                    request.offset
                );
            }
            break;
        }
        if previous_rows.as_deref() == Some(rows) {
            bail!(
                "server returned the same rows for offset {}; it is ignoring the offset",
                request.offset
            );
        }

        for row in rows {
            sink(row)?;
        }
        delivered += rows.len() as u64;

        let Some(next) = request.next(rows.len() as u64) else {
            bail!("row offset overflowed after offset {}", request.offset);
        };
        let drained = match expected_total {
            Some(total) => next.offset >= total,
            None => rows.len() < request.page_size() as usize,
        };
        if drained {
            break;
        }
        debug!(offset = next.offset, delivered, "requesting next page");
        previous_rows = Some(rows.to_vec());
        request = next;
    }

    Ok(delivered)
}

fn check_version(server: &str, analysis: Option<&str>) -> anyhow::Result<()> {
    let server: ProductVersion = server.parse()?;
    if !server.is_supported() {
        bail!(
            "server version {server} is older than the minimum supported {}",
            ProductVersion::MINIMUM_SUPPORTED
        );
    }
    println!("server {server}: supported");

    if let Some(analysis) = analysis {
        let analysis: ProductVersion = analysis.parse()?;
        if !server.compare_to_analysis(&analysis) {
            bail!("server version {server} cannot accept results from analysis {analysis}");
        }
        println!("analysis {analysis}: compatible");
    }
    Ok(())
}
