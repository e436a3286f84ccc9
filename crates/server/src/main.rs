use std::path::PathBuf;

use anyhow::{bail, Context};
use chess_server::{build_router, AppState, ServerConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: chess_server [--config <file.toml>]

Environment:
  PORT       overrides the configured port
  RUST_LOG   log filter (default: info)";

fn parse_args() -> anyhow::Result<Option<PathBuf>> {
    let mut config = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?}\n\n{USAGE}"),
        }
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        return;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = parse_args()?;
    let config = ServerConfig::load(config_path.as_deref())?
        .with_port_override(std::env::var("PORT").ok())?;

    let addr = config.bind_addr();
    if !config.static_dir.is_dir() {
        tracing::warn!(dir = %config.static_dir.display(), "static client directory not found");
    }
    tracing::info!(
        agent_color = %config.agent_color,
        delay_ms = config.agent_delay_ms,
        "agent settings"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{addr}");
    tracing::info!("health check at http://{addr}/api/health");

    let app = build_router(AppState::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
