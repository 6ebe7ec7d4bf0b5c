use anyhow::{Context, Result};
use marketplace_ranking::{
    config::LogFormat,
    handlers::{handle, parse_request},
    Config,
};
use std::io::Read;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load config")?;

    // Logs go to stderr so stdout carries only the ranked JSON
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    match config.service.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    info!(service = %config.service.service_name, "Handling ranking request");

    let request = parse_request(&input)?;
    let response = handle(request, &config).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to encode response")?
    );

    Ok(())
}
