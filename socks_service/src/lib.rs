//! Socks Service - sock inventory over SQLite
//!
//! Records stock arrivals and departures, answers amount queries, lists
//! filtered pages of records and bulk-imports batches from CSV/XLSX uploads.

pub mod config;
pub mod database;
pub mod error;
pub mod import;
pub mod inventory;
pub mod models;
pub mod query;
pub mod web;

pub use config::Config;
pub use database::{init_schema, open_database};
pub use error::{InventoryError, Result};
pub use models::{Sock, SockBatch, SockUpdate};
pub use query::{Operator, Page, PageRequest, SockFilter, SortDirection, SortField};
