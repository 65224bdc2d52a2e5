//! Quiver CLI.
//!
//! - `quiver serve [flags]`: run the server until Ctrl-C
//! - `quiver smoke [flags]`: heartbeat a running server and recreate a
//!   scratch collection

mod commands;
mod parse;

use anyhow::Context;
use quiver_client::{ClientConfig, Session};
use quiver_core::{CollectionOptions, DistanceMetric};
use quiver_server::{Server, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use parse::{matches_to_action, CliAction};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quiver=info")),
        )
        .init();

    let matches = build_cli().get_matches();
    match matches_to_action(&matches)? {
        CliAction::Serve(config) => serve(config).await,
        CliAction::Smoke {
            client,
            collection,
            dimension,
        } => smoke(client, &collection, dimension).await,
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.data_dir.is_none() {
        warn!("No data directory configured; collections will not survive a restart");
    }
    let server = Server::bind(&config)
        .await
        .with_context(|| format!("starting server on {}", config.bind))?;

    server
        .serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn smoke(client: ClientConfig, collection: &str, dimension: usize) -> anyhow::Result<()> {
    let addr = client.address();
    let mut session = Session::connect(client)
        .await
        .with_context(|| format!("connecting to {}", addr))?;

    let ts = session.heartbeat().await?;
    let version = session.version().await?;
    println!("heartbeat {} (server {})", ts, version);

    if session.delete_collection_if_exists(collection).await? {
        println!("dropped existing collection {}", collection);
    }
    let info = session
        .create_collection(
            collection,
            CollectionOptions::new()
                .dimension(dimension)
                .metric(DistanceMetric::Cosine),
        )
        .await?;
    println!(
        "created collection {} (id {}, dimension {:?}, {})",
        info.name, info.id, info.dimension, info.metric
    );

    session.close().await?;
    Ok(())
}
