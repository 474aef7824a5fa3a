mod api_types;
mod error;
mod handlers;
mod logging;
mod routes;
mod scenario;
mod validation;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, ensure};
use finproj_core::analysis::MAX_SWEEP_STEPS;

use crate::handlers::AppState;
use crate::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "finproj")]
#[command(about = "Month-by-month personal finance projections")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the projection HTTP API
    Serve(ServeArgs),
    /// Run one scenario file and print the projection as JSON
    Project(ProjectArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "FINPROJ_BIND", default_value = "127.0.0.1:3001")]
    bind: SocketAddr,

    /// Most runs a single sensitivity sweep may request
    #[arg(long, env = "FINPROJ_MAX_SWEEP_STEPS", default_value_t = MAX_SWEEP_STEPS)]
    max_sweep_steps: usize,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// Scenario file (.json, .yaml or .yml)
    #[arg(short, long)]
    input: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Project(args) => run_scenario(args),
    }
}

async fn serve(args: ServeArgs) -> color_eyre::Result<()> {
    ensure!(
        (2..=MAX_SWEEP_STEPS).contains(&args.max_sweep_steps),
        "--max-sweep-steps must be between 2 and {MAX_SWEEP_STEPS}"
    );
    let state = AppState {
        max_sweep_steps: args.max_sweep_steps,
    };
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", args.bind))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}

fn run_scenario(args: ProjectArgs) -> color_eyre::Result<()> {
    let input = scenario::load_scenario(&args.input)?;
    let response = finproj_core::project(&input)
        .wrap_err_with(|| format!("scenario {} was rejected", args.input.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");
    Ok(())
}
