// ABOUTME: Boot sequence for the Blueprint server binary
// ABOUTME: Flags, env config, state wiring, CORS, and axum serve

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::http::Method;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blueprint_ai::{GeminiBackend, GenerationClient};
use blueprint_api::AppState;
use blueprint_storage::ProjectRepository;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Blueprint - AI project scoping and workspace generation server")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides BLUEPRINT_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blueprint=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = Config::from_env()?;
    let port = cli.port.unwrap_or(config.port);

    println!("🚀 Starting Blueprint server...");
    println!("📡 Server will run on http://{}:{}", cli.host, port);
    println!("🔗 CORS origin: {}", config.cors_origin);

    let client =
        GenerationClient::with_backend(Arc::new(GeminiBackend::with_api_key(config.api_key)));
    let repository = match ProjectRepository::load().await {
        Ok(repository) => repository,
        Err(e) => {
            eprintln!("⚠️  Could not read saved projects ({}); starting with an empty gallery", e);
            ProjectRepository::empty()
        }
    };
    let state = AppState::new(client, repository);

    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<axum::http::HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Create the router with CORS
    let app = blueprint_api::create_router(state).layer(cors);

    let addr = SocketAddr::new(cli.host, port);

    println!("✅ Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
