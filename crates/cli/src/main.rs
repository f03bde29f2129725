//! connect-views CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — command-line flags with environment
//!    fallbacks (`CONNECT_URL`, `CONNECT_TIMEOUT_SECS`,
//!    `CONNECT_SESSION_ON_LISTING`, `OTEL_EXPORTER_OTLP_ENDPOINT`).
//! 2. **Wire observability** — configure `tracing-subscriber` with a text or
//!    JSON layer and, when an endpoint is configured, an OpenTelemetry OTLP
//!    exporter. All `tracing` spans and events emitted by the workspace flow
//!    through these layers.
//! 3. **Construct infrastructure** — build the reqwest transport and the
//!    `ViewsClient`, which establishes the server session.
//! 4. **Run the subcommand** — list views, fetch one page or drain a view, or
//!    check a server version.

mod args;
mod commands;
mod telemetry;

use clap::Parser;
use connect::RunId;
use tracing::{info_span, Instrument};

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let telemetry = telemetry::init(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let run_id = RunId::new_random();
    let span = info_span!("run", run_id = %run_id);
    let result = commands::run(&cli).instrument(span).await;

    telemetry.shutdown();
    result
}
