//! Simple EPUB Creator server
//!
//! Serves the home and TXT to EPUB converter pages under the resolved base
//! path.

use clap::{Parser, Subcommand};
use tracing::{info, instrument};

mod config;
mod routes;
mod state;
mod templates;

use config::{Config, Overrides};
use state::AppState;

/// Simple EPUB Creator server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to bind to
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Environment mode (development or production)
    #[arg(long)]
    mode: Option<String>,

    /// Build command (serve or build)
    #[arg(long)]
    build_command: Option<String>,

    /// What selects the deployment path (mode or command)
    #[arg(long)]
    trigger: Option<String>,

    /// Sub-path the application is published under
    #[arg(long)]
    deploy_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print the route table with base-prefixed links
    Routes,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            addr: self.addr.clone(),
            mode: self.mode.clone(),
            command: self.build_command.clone(),
            trigger: self.trigger.clone(),
            deploy_path: self.deploy_path.clone(),
        }
    }
}

#[tokio::main]
#[instrument]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,epub_creator=debug,epub_creator_core=debug".into()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI args
    let args = Args::parse();

    // Load configuration
    let config = Config::load(args.config.as_deref())?.with_overrides(args.overrides());

    // Bootstrap once; a missing mount anchor ends the process here
    let state = AppState::new(config)?;

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Routes => {
            print_routes(&state);
            Ok(())
        }
        Commands::Serve => serve(state).await,
    }
}

fn print_routes(state: &AppState) {
    let router = state.router();
    println!("base path: {}", router.base());
    for route in router.table().routes() {
        println!(
            "{:<20} {:<40} {}",
            route.name(),
            router.base().href(route.path()),
            route.title().unwrap_or("-")
        );
    }
}

async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.addr.clone();
    info!(addr = %addr, base_path = %state.router().base(), "Starting Simple EPUB Creator");

    // Build Axum router
    let app = routes::app_routes(state)
        // Add middleware
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        .layer(tower_http::compression::CompressionLayer::new());

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
