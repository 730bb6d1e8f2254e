mod config;
mod error;
mod handlers;
mod input;
mod models;
mod resolver;
mod routes;
mod state;
mod summary;

use anyhow::Context;
use config::Config;
use resolver::Resolver;
use state::AppState;
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = Config::from_args();
    init_tracing(config.verbose);

    if let Err(err) = run(config).await {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("mok starting");
    config.log_startup();

    let direct_input =
        input::read_direct_input(config.json_string.as_deref(), config.stdin_wait).await?;
    if let Some(input) = &direct_input {
        tracing::info!("serving {} bytes of direct input on /", input.as_bytes().len());
    }

    // The shell has already expanded any globs into individual files
    let resolver = Resolver::from_config(&config)?;
    let routes = resolver
        .resolve(&config.sources, direct_input.as_ref())
        .await?;

    let banner = summary::startup_summary(&config.base_url(), &routes, direct_input.is_some());
    let app = routes::router(AppState::new(routes, direct_input));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("http")?;
    print!("{}", banner);
    std::io::stdout().flush().context("write summary")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http")?;

    tracing::info!("mok stopped");
    Ok(())
}

/// Logs go to stderr; `-v` turns on diagnostics unless `RUST_LOG` says otherwise
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "mok=debug,tower_http=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
