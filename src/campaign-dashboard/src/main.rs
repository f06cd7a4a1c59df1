//! Influencer Campaign Dashboard — spend, engagement, and stream analytics.
//!
//! Serves the dashboard payload over HTTP, or prints a one-off report.

use campaign_api::ApiServer;
use campaign_core::config::AppConfig;
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "campaign-dashboard")]
#[command(about = "Influencer campaign analytics dashboard")]
#[command(version)]
struct Cli {
    /// Path to the engagement CSV (overrides config)
    #[arg(long, global = true, env = "CAMPAIGN_DASHBOARD__DATA__CSV_PATH")]
    csv: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, global = true, env = "CAMPAIGN_DASHBOARD__API__HTTP_PORT")]
    http_port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard API (default)
    Serve,

    /// Load the CSV once and print the dashboard snapshot as JSON
    Report {
        /// Pretty-print the JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `report` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campaign_dashboard=info,campaign_reporting=info,campaign_api=info,tower_http=info"
                    .into()
            }),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    if let Some(csv) = cli.csv {
        config.data.csv_path = csv;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        csv_path = %config.data.csv_path,
        campaign = %config.campaign.title,
        http_port = config.api.http_port,
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Report { pretty } => report(&config, pretty).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let api_server = ApiServer::new(config);

    if let Err(e) = api_server.start_metrics() {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Campaign dashboard is ready to serve traffic");

    // Blocks until shutdown
    api_server.start_http().await
}

async fn report(config: &AppConfig, pretty: bool) -> anyhow::Result<()> {
    let snapshot = campaign_reporting::load_snapshot(&config.data.csv_path).await;

    let output = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{output}");

    Ok(())
}
