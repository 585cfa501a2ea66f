//! rate-history CLI — refresh and print the EUR-USD history for one period.
//!
//! Settings come from `RATE_HISTORY_*` environment variables (a `.env` file
//! is honoured) and can be overridden by flags.

use clap::Parser;
use rate_history::prelude::*;
use serde_json::json;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rate-history",
    about = "EUR-USD exchange rate history — table and chart configuration"
)]
struct Cli {
    /// Lookback period: 1m, 3m, 6m or 12m. Defaults to RATE_HISTORY_PERIOD or 1m.
    #[arg(long, short)]
    period: Option<Period>,

    /// Base URL of the rate service.
    #[arg(long)]
    base_url: Option<String>,

    /// Bound on the whole refresh cycle, in seconds.
    #[arg(long)]
    refresh_timeout_secs: Option<u64>,

    /// Bound on each HTTP call, in seconds.
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Print rows and chart configuration as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rate_history=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, RateHistoryError> {
    let mut config = RatesConfig::from_env()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(secs) = cli.refresh_timeout_secs {
        config.refresh_timeout_secs = Some(secs);
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    let period = cli.period.unwrap_or(config.initial_period);

    tracing::info!(base_url = %config.base_url, %period, "loading rate history");
    let client = RateHistoryClient::builder().config(config).build()?;
    let view = client.select_period(period).await;

    if cli.json {
        let body = json!({
            "period": view.period,
            "rows": view.table_rows(),
            "chart": view.chart_config(),
            "error": view.error().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", view.period.label());
        println!();
        print!("{}", TableView::new(&view).render());
        println!();
        print!("{}", ChartView::new(&view).render());
        println!();
    }

    Ok(if view.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
