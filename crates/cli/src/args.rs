//! Command-line and environment configuration.

use clap::{Parser, Subcommand, ValueEnum};

/// Browse saved issue views on an analysis server.
#[derive(Debug, Parser)]
#[command(name = "connect-views", version)]
pub struct Cli {
    /// Base URL of the server (e.g. `https://connect.example.com:8443/`).
    #[arg(long, env = "CONNECT_URL", global = true)]
    pub url: Option<String>,

    /// Whole-request timeout in seconds.
    #[arg(long, env = "CONNECT_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Send session cookies with view-listing requests as well.
    #[arg(long, env = "CONNECT_SESSION_ON_LISTING", global = true)]
    pub session_on_listing: bool,

    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; tracing spans are exported when set.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    pub otlp_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the server's issue views as `id<TAB>name`.
    Views,

    /// Fetch the contents of a view.
    Contents {
        /// Project scope.
        #[arg(long)]
        project: String,

        /// View name, as printed by `views`.
        #[arg(long)]
        view: String,

        /// Rows per request.
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,

        /// Zero-based row offset of the first page.
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Keep fetching pages until the view is exhausted, printing one row
        /// per line.
        #[arg(long)]
        all: bool,
    },

    /// Check a server version against the supported minimum and, optionally,
    /// an analysis version.
    CheckVersion {
        /// Server version (e.g. `8.7.1` or `2018.12`).
        #[arg(long)]
        server: String,

        /// Analysis tool version the server must accept.
        #[arg(long)]
        analysis: Option<String>,
    },
}
