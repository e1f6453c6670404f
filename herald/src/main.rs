use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;

use alert_relay::config::{ENV_GCHAT_THREAD_KEY, ENV_GCHAT_WEBHOOK_URL};
use config::{Config, ConfigError, MetricsConfig};

#[derive(thiserror::Error, Debug)]
enum HeraldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] alert_relay::config::ValidationError),
    #[error(transparent)]
    Relay(#[from] alert_relay::errors::RelayError),
    #[error("could not install metrics exporter: {0}")]
    Metrics(String),
    #[error("could not build tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Relays Rollbar error-alert webhooks into Google Chat threads.
#[derive(Parser)]
#[command(name = "herald")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), HeraldError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration file");
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    config.relay.chat.apply_overrides(
        std::env::var(ENV_GCHAT_WEBHOOK_URL).ok(),
        std::env::var(ENV_GCHAT_THREAD_KEY).ok(),
    )?;
    config.relay.validate()?;

    // Must be held for the lifetime of the process.
    let _sentry_guard = config.logging.as_ref().map(|logging| {
        sentry::init((
            logging.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    if let Some(metrics_config) = &config.metrics {
        install_statsd_exporter(metrics_config)?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(alert_relay::run(config.relay))?;
    Ok(())
}

fn install_statsd_exporter(config: &MetricsConfig) -> Result<(), HeraldError> {
    let recorder = StatsdBuilder::from(&config.statsd_host, config.statsd_port)
        .build(Some("herald"))
        .map_err(|e| HeraldError::Metrics(e.to_string()))?;

    metrics::set_global_recorder(recorder).map_err(|e| HeraldError::Metrics(e.to_string()))?;
    Ok(())
}
