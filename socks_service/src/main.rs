//! Socks Service - sock inventory HTTP server
//!
//! Opens (or creates) the SQLite database and serves the inventory API
//! until interrupted.

use clap::Parser;
use socks_service::{open_database, web, Config};
use std::error::Error;
use std::sync::{Arc, Mutex};

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let db_path = config.database_path();
    log::info!("Database path: {}", db_path.display());

    let conn = open_database(&db_path)?;
    web::serve(Arc::new(Mutex::new(conn)), &config).await
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Config::parse()).await {
        log::error!("socks_service failed: {}", e);
        std::process::exit(1);
    }
}
