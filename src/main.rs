use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bordereau::config::ConnectorConfig;
use bordereau::connector::Connector;
use bordereau::webservice::WebserviceClient;

/// Storefront order-export pipeline.
#[derive(Parser, Debug)]
#[command(name = "bordereau", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "bordereau.toml", env = "BORDEREAU_CONFIG")]
    config: String,

    /// Stop after exporting this many orders (overrides the config)
    #[arg(short, long)]
    limit: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "BORDEREAU_LOG_LEVEL")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone())),
        )
        .init();

    match run(cli) {
        Ok(had_errors) => {
            if had_errors {
                tracing::warn!("run finished with skipped orders or importer errors");
            }
            // Skipped orders do not fail the run; only escaped errors do.
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("run aborted: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config =
        ConnectorConfig::load(&cli.config).with_context(|| format!("loading {}", cli.config))?;
    if cli.limit.is_some() {
        config.run.order_limit = cli.limit;
    }

    let client = WebserviceClient::new(&config.webservice.url, &config.webservice.api_key)
        .context("building the webservice client")?;
    let report = Connector::new(config, client).run()?;

    tracing::info!(
        orders = report.orders_exported,
        refunds = report.refunds_exported,
        products = report.products_exported,
        invalid = report.invalid_orders,
        update_failures = report.update_failures,
        importer_errors = report.importer_reported_errors,
        "export summary"
    );
    Ok(report.has_errors())
}
