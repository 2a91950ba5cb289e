//! Docker Parse Server - Main Application Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use config::{ConfigLoader, ConfigValidator, EnvironmentMap};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::utils::redact;

mod api;
mod app;

use app::Application;

/// Resolve Parse Server settings from the environment and serve the API
#[derive(Debug, Parser)]
#[command(name = "docker-parse-server", version)]
struct Cli {
    /// Load variables from this file before reading the environment
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Print the resolved configuration (secrets masked) as YAML and exit
    #[arg(long)]
    dump_config: bool,

    /// Resolve and validate the configuration, then exit
    #[arg(long, conflicts_with = "dump_config")]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file before anything reads the environment
    let dotenv_result = match &cli.env_file {
        Some(path) => dotenv::from_path(path).map(|_| path.clone()),
        None => dotenv::dotenv(),
    };

    // Initialize logging
    init_logging()?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if cli.env_file.is_some() => {
            return Err(e).context("Failed to load environment file");
        }
        Err(e) if !e.not_found() => warn!("Could not load .env file: {}", e),
        Err(_) => {}
    }

    info!("Starting docker-parse-server v{}", env!("CARGO_PKG_VERSION"));

    // Resolve configuration from a single snapshot of the environment
    let env = EnvironmentMap::from_process();
    let config = ConfigLoader::new()
        .assemble(&env)
        .context("Failed to resolve configuration")?;

    let report = ConfigValidator::validate(&config);
    report.log();
    info!("{}", report.summary());

    if cli.dump_config {
        print!("{}", ConfigLoader::dump_yaml(&config)?);
        return Ok(());
    }

    if cli.check {
        for issue in &report.errors {
            println!("error: {}", issue);
        }
        for issue in &report.warnings {
            println!("warning: {}", issue);
        }
        let summary = report.summary();
        report.into_result().context(summary.clone())?;
        println!("{}", summary);
        return Ok(());
    }

    info!("appId: {}", config.app_id);
    info!("masterKey: {}", redact(config.master_key.as_deref()));
    info!(
        "Files adapter: {}, push: {}, email verification: {}",
        config.files_adapter.provider(),
        if config.push_enabled() { "enabled" } else { "disabled" },
        config.verify_user_emails
    );

    // Create and start the application
    let app = Application::new(config).context("Failed to create application")?;

    // Setup signal handling
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, draining connections...");
    };

    if let Err(e) = app.run(shutdown_signal).await {
        tracing::error!("Application error: {}", e);
        return Err(e);
    }

    info!("docker-parse-server shutdown complete");
    Ok(())
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format.as_str() {
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    info!("Logging initialized");
    info!("Log level: {}", log_level);
    info!("Log format: {}", log_format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["docker-parse-server", "--env-file", "/etc/parse.env", "--check"]);
        assert_eq!(cli.env_file, Some(PathBuf::from("/etc/parse.env")));
        assert!(cli.check);
        assert!(!cli.dump_config);

        assert!(Cli::try_parse_from(["docker-parse-server", "--check", "--dump-config"]).is_err());
    }
}
