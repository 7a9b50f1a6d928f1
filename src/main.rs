//! Thrill leaderboard proxy entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use thrill_leaderboard_proxy::api::{create_router, AppState, LEADERBOARD_PATH};
use thrill_leaderboard_proxy::config::Config;
use thrill_leaderboard_proxy::leaderboard::{
    format_date, leaderboard_url, parse_date, Clock, DateWindow, SystemClock, ThrillClient,
};
use thrill_leaderboard_proxy::metrics;
use thrill_leaderboard_proxy::utils::shutdown_signal;

/// Thrill referral leaderboard proxy.
#[derive(Parser, Debug)]
#[command(name = "leaderboard-proxy")]
#[command(about = "Serves the bi-weekly Thrill referral leaderboard")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the date window and upstream URL.
    Window {
        /// Date to compute the window for (YYYY-MM-DD, default today UTC).
        #[arg(long)]
        date: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration is loaded first so RUST_LOG / LOG_JSON can come from .env
    let config = Config::load();
    let (rust_log, log_json) = match &config {
        Ok(c) => (c.rust_log.clone(), c.log_json),
        Err(_) => ("info".to_string(), false),
    };

    init_tracing(args.verbose, &rust_log, log_json);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Window { date }) => cmd_window(config?, date),
        Some(Command::Serve { port }) => cmd_serve(config?, port.or(args.port)).await,
        None => cmd_serve(config?, args.port).await,
    }
}

fn init_tracing(verbose: bool, rust_log: &str, json: bool) {
    let filter = if verbose {
        EnvFilter::new("thrill_leaderboard_proxy=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(rust_log))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("LEADERBOARD PROXY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Thrill API URL: {}", config.thrill_api_url);
    println!(
        "  API Token: {}",
        if config.has_api_token() { "present" } else { "MISSING" }
    );
    match config.http_timeout_ms {
        Some(ms) => println!("  Upstream Timeout: {}ms", ms),
        None => println!("  Upstream Timeout: none"),
    }
    println!("  Listen: {}:{}", config.host, config.port);
    println!("======================================================================");

    if !config.has_api_token() {
        println!("WARNING: THRILL_API_TOKEN is not set, every request will return 500");
        println!("======================================================================");
    } else {
        println!("CONFIGURATION CHECK PASSED");
        println!("======================================================================");
    }

    Ok(())
}

/// Print the window and upstream URL for a date.
fn cmd_window(config: Config, date: Option<String>) -> anyhow::Result<()> {
    let today = match date {
        Some(d) => parse_date(&d)?,
        None => SystemClock.today(),
    };

    let window = DateWindow::containing(today)?;
    let url = leaderboard_url(&Url::parse(&config.thrill_api_url)?, &window)?;

    println!("Date:     {}", format_date(today)?);
    println!("fromDate: {}", format_date(window.from())?);
    println!("toDate:   {}", format_date(window.to())?);
    println!("URL:      {}", url);

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Upstream: {}", config.thrill_api_url);
    if !config.has_api_token() {
        warn!("THRILL_API_TOKEN is not set, leaderboard requests will fail");
    }

    let port = port_override.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", config.host, port).parse()?;

    let client = ThrillClient::from_config(&config)?;
    let mut app_state = AppState::new(config, client)?;

    match metrics::install_prometheus() {
        Ok(handle) => app_state = app_state.with_prometheus(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("Leaderboard endpoint: {}", LEADERBOARD_PATH);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
