use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use backend::{
    app::Components,
    cli::{Cli, Command},
    config::AppConfig,
    webhook,
};
use common::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_logger("rci-alert", is_production);

    let cli = Cli::parse();

    let cfg = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    tracing::info!(
        token_present = cfg.credentials.token_present(),
        user_id = %cfg.credentials.user_id,
        pairs = cfg.file.pairs.len(),
        "configuration loaded"
    );

    let components = Components::from_config(&cfg)?;

    match cli.command {
        Command::Run => {
            let passes = components.scheduler(&cfg).run().await;
            tracing::info!(passes, "scheduler exited");
        }
        Command::Serve { port, bind } => {
            let state = components.webhook_state(&cfg);
            let app = webhook::router(state);

            let addr = SocketAddr::new(bind, port);
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {addr}"))?;

            tracing::info!(%addr, "webhook server listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
