//! Folio Server Binary

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use folio_server::{serve, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "folio-server", version, about = "Serve the site without browser caching")]
struct Args {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory to serve
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Press Ctrl+C to stop the server");

    serve(&addr, &args.root).await
}
