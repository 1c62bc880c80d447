//! Command-line entry point for the eligible revenue engine.
//!
//! `serve` (the default) runs the HTTP API; `evaluate` reads one request
//! from a JSON file and prints the response.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use revenue_engine::api::{AppState, EvaluationRequest, build_response, create_router};
use revenue_engine::config::ConfigLoader;
use revenue_engine::error::EngineError;

const DEFAULT_CONFIG_DIR: &str = "./config/catalogue";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(
    name = "revenue-engine",
    about = "Compute the eligible monthly revenue of a mortgage borrower",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate one request read from a JSON file and print the response
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the host of the listening address
    #[arg(long)]
    host: Option<String>,
    /// Override the port of the listening address
    #[arg(long)]
    port: Option<u16>,
    /// Status catalogue directory
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Path to a JSON evaluation request
    #[arg(long)]
    file: PathBuf,
    /// Status catalogue directory
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid request file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid listening address '{value}': {source}")]
    Addr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid log filter '{value}': {source}")]
    LogFilter {
        value: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("tracing subscriber error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Evaluate(args) => run_evaluate(args),
    }
}

fn init_tracing() -> Result<(), AppError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER).map_err(|source| AppError::LogFilter {
            value: DEFAULT_LOG_FILTER.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(AppError::Subscriber)
}

/// Catalogue directory: flag, then `REVENUE_ENGINE_CONFIG`, then the default.
fn config_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("REVENUE_ENGINE_CONFIG").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
}

/// Listening address from `REVENUE_ENGINE_ADDR`, with `--host`/`--port` overrides.
fn listen_addr(host: Option<String>, port: Option<u16>) -> Result<SocketAddr, AppError> {
    let base = std::env::var("REVENUE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let mut addr: SocketAddr = base.parse().map_err(|source| AppError::Addr {
        value: base.clone(),
        source,
    })?;

    if let Some(host) = host {
        addr.set_ip(host.parse().map_err(|source| AppError::Addr {
            value: host.clone(),
            source,
        })?);
    }
    if let Some(port) = port {
        addr.set_port(port);
    }
    Ok(addr)
}

async fn run_server(args: ServeArgs) -> Result<(), AppError> {
    let ServeArgs { host, port, config } = args;

    let config_dir = config_dir(config);
    let catalogue = ConfigLoader::load(&config_dir)?;
    info!(
        path = %config_dir.display(),
        catalogue = %catalogue.metadata().name,
        version = %catalogue.metadata().version,
        "status catalogue loaded"
    );

    let app = create_router(AppState::new(catalogue));
    let addr = listen_addr(host, port)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "eligible revenue engine ready");
    axum::serve(listener, app).await?;
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let catalogue = ConfigLoader::load(config_dir(args.config))?;

    let raw = std::fs::read_to_string(&args.file)?;
    let request: EvaluationRequest = serde_json::from_str(&raw)?;

    let response = build_response(Uuid::new_v4(), &request, &catalogue)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
