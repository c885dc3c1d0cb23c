//! Command-line and environment configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Sock inventory server - stock arrivals, departures and bulk imports over SQLite
#[derive(Parser, Debug, Clone)]
#[command(name = "socks_service")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the SQLite database file
    #[arg(short, long, env = "SOCKS_DATABASE", default_value_t = default_db_path())]
    pub database: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "SOCKS_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port for the HTTP server
    #[arg(short, long, env = "SOCKS_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Largest accepted upload for bulk import, in megabytes
    #[arg(long, env = "SOCKS_MAX_UPLOAD_MB", default_value_t = 10)]
    pub max_upload_mb: usize,

    /// Allow cross-origin requests from any origin
    #[arg(long, default_value_t = false)]
    pub cors: bool,
}

impl Config {
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

/// Returns the default database path: ~/.local/share/socks_service/socks.db
fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("socks_service")
        .join("socks.db")
        .to_string_lossy()
        .to_string()
}
