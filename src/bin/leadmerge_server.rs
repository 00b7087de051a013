//! Leadmerge HTTP Server
//!
//! A standalone server binary exposing the merge/query engine over
//! HTTP/JSON, backed by the externally seeded SQLite leads database.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use leadmerge::storage::SqliteStore;
use leadmerge::transport::{self, AppState};
use leadmerge::MergeEngine;

/// Server configuration
struct Config {
    /// Address to bind to
    addr: SocketAddr,
    /// Path to the seeded leads database
    db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:5000".parse().unwrap(),
            db_path: PathBuf::from("data/leads.db"),
        }
    }
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    let port: u16 = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("error: invalid port number: {}", args[i + 1]);
                        std::process::exit(1);
                    });
                    config.addr.set_port(port);
                    i += 2;
                } else {
                    eprintln!("error: --port requires a value");
                    std::process::exit(1);
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.db_path = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("error: --db requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("leadmerge-server - Leadmerge HTTP Server");
                println!();
                println!("USAGE:");
                println!("    leadmerge-server [OPTIONS]");
                println!();
                println!("OPTIONS:");
                println!("    -p, --port <PORT>    Port to listen on [default: 5000]");
                println!("    -d, --db <FILE>      Leads database file [default: data/leads.db]");
                println!("    -h, --help           Print help information");
                std::process::exit(0);
            }
            arg => {
                eprintln!("error: unknown argument: {arg}");
                std::process::exit(1);
            }
        }
    }

    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = parse_args();

    info!("Leadmerge Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Opening leads database at: {}", config.db_path.display());

    // The store verifies reachability up front and then opens a fresh
    // read-only connection per request.
    let store = SqliteStore::open(&config.db_path)?;
    let engine = MergeEngine::new(Arc::new(store));
    let state = Arc::new(AppState { engine });

    info!("Database opened successfully");
    info!("Starting HTTP server on {}", config.addr);
    info!("Press Ctrl+C to stop");

    transport::run(state, config.addr).await?;

    info!("Shut down");
    Ok(())
}
