pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use cli::Commands;
pub use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs an already parsed command against a loaded configuration.
pub async fn run(command: Option<Commands>, config: Config) -> anyhow::Result<()> {
    if matches!(command, Some(Commands::Init)) {
        return cli::cmd_init(&Config::default_config_path());
    }

    config.validate()?;

    let serving = matches!(command, None | Some(Commands::Serve));

    let prometheus_handle = if serving && config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    init_tracing(&config);

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    match command {
        None | Some(Commands::Serve) => cli::cmd_serve(config, prometheus_handle).await,
        Some(Commands::Search { query }) => cli::cmd_search(config, &query.join(" ")).await,
        Some(Commands::Init) => Ok(()),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
