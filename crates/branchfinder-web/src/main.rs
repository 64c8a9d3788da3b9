//! branchfinder-web — browser front end for branchfinder-core
//!
//! Usage examples
//! --------------
//!
//! - Serve on the default address (127.0.0.1:8080)
//!   $ branchfinder-web --input uba_branches.csv
//!
//! - Listen elsewhere, with settings from a file
//!   $ branchfinder-web --config finder.toml --bind 0.0.0.0:3000
//!
//! A missing dataset does not stop the server: the page shows the error and
//! the search form stays disabled.
use anyhow::Context;
use branchfinder_core::{BranchTable, ConfigArgs, Finder, NominatimClient};
use branchfinder_web::{router, AppState, SharedGeocoder};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments for branchfinder-web
#[derive(Debug, Parser)]
#[command(
    name = "branchfinder-web",
    version,
    about = "Web form for finding bank branches, with a search-history sidebar"
)]
struct WebArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Address to listen on
    #[arg(short = 'b', long = "bind", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = WebArgs::parse();
    let config = args.config.resolve().context("invalid configuration")?;

    let (table, dataset_error) = match BranchTable::load_from_path(&config.dataset, &config.country) {
        Ok(t) => (Some(t), None),
        Err(e) => {
            error!(error = %e, "dataset unavailable, search disabled");
            (None, Some(e.to_string()))
        }
    };

    // The blocking HTTP client is built outside the async runtime.
    let geocoder: SharedGeocoder =
        Arc::new(NominatimClient::from_config(&config).context("cannot build HTTP client")?);
    let state = AppState::new(Finder::new(table, geocoder, config), dataset_error);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("cannot start tokio runtime")?;
    runtime.block_on(serve(state.clone(), args.bind))?;

    info!(sessions = state.session_count(), "shut down");
    Ok(())
}

async fn serve(state: AppState, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("cannot bind {bind}"))?;
    info!(%bind, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
