#![allow(non_snake_case)]

use std::env;

use calendarStories::cli::{self, Cli};
use calendarStories::config::{AppConfig, Settings};
use clap::Parser;
use tracing::{error, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
            warn!(%path, error = %e, "ignoring unreadable config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let settings = match Settings::resolve(get_prop) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    if let Err(e) = cli::run(cli, settings).await {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}
