//! Database operations for the socks table
//!
//! Uses parameterized queries exclusively (no SQL string concatenation of values).
//! Functions take a `Connection` so they also run inside a `Transaction`.

use std::path::Path;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{Sock, SockBatch};
use crate::query::{Operator, PageRequest, SockFilter};

/// Result type for database operations
pub type DbResult<T> = rusqlite::Result<T>;

const SOCK_COLUMNS: &str = "id, color, cotton_percentage, amount";

/// Initialize the database schema
///
/// Creates the `socks` table if it doesn't exist. The (color, cotton_percentage)
/// index is not unique: bulk import inserts rows without coalescing.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS socks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            color TEXT NOT NULL,
            cotton_percentage REAL NOT NULL,
            amount INTEGER NOT NULL CHECK (amount >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_socks_color_cotton ON socks(color, cotton_percentage);
        ",
    )?;

    log::info!("Database schema initialized");
    Ok(())
}

/// Open (or create) the database file, creating missing parent directories,
/// and make sure the schema exists.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            std::fs::create_dir_all(parent)?;
            log::info!("Created directory: {}", parent.display());
        }
    }

    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    log::info!("Opened database: {}", path.display());
    Ok(conn)
}

fn sock_from_row(row: &Row<'_>) -> DbResult<Sock> {
    Ok(Sock {
        id: row.get(0)?,
        color: row.get(1)?,
        cotton_percentage: row.get(2)?,
        amount: row.get(3)?,
    })
}

/// Find the bucket for an exact (color, cotton_percentage) pair
///
/// If duplicates exist the oldest row is the bucket.
pub fn find_by_color_and_cotton(
    conn: &Connection,
    color: &str,
    cotton_percentage: f64,
) -> DbResult<Option<Sock>> {
    conn.query_row(
        &format!(
            "SELECT {SOCK_COLUMNS} FROM socks
             WHERE color = ?1 AND cotton_percentage = ?2
             ORDER BY id ASC LIMIT 1"
        ),
        params![color, cotton_percentage],
        sock_from_row,
    )
    .optional()
}

pub fn find_by_id(conn: &Connection, id: i64) -> DbResult<Option<Sock>> {
    conn.query_row(
        &format!("SELECT {SOCK_COLUMNS} FROM socks WHERE id = ?1"),
        params![id],
        sock_from_row,
    )
    .optional()
}

/// Insert one record and return it with its generated id
pub fn insert_sock(conn: &Connection, batch: &SockBatch) -> DbResult<Sock> {
    conn.execute(
        "INSERT INTO socks (color, cotton_percentage, amount) VALUES (?1, ?2, ?3)",
        params![&batch.color, batch.cotton_percentage, batch.amount],
    )?;

    Ok(Sock {
        id: conn.last_insert_rowid(),
        color: batch.color.clone(),
        cotton_percentage: batch.cotton_percentage,
        amount: batch.amount,
    })
}

/// Insert many records as-is, without looking for existing buckets
///
/// Caller owns the transaction.
pub fn insert_socks(conn: &Connection, batches: &[SockBatch]) -> DbResult<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO socks (color, cotton_percentage, amount) VALUES (?1, ?2, ?3)",
    )?;

    let mut count = 0;
    for batch in batches {
        stmt.execute(params![&batch.color, batch.cotton_percentage, batch.amount])?;
        count += 1;
    }

    log::info!("Inserted {} sock records", count);
    Ok(count)
}

/// Overwrite the amount of one record; returns the number of rows touched
pub fn set_amount(conn: &Connection, id: i64, amount: i64) -> DbResult<usize> {
    conn.execute(
        "UPDATE socks SET amount = ?1 WHERE id = ?2",
        params![amount, id],
    )
}

/// Overwrite color and cotton percentage of one record, leaving amount alone
pub fn set_color_and_cotton(
    conn: &Connection,
    id: i64,
    color: &str,
    cotton_percentage: f64,
) -> DbResult<usize> {
    conn.execute(
        "UPDATE socks SET color = ?1, cotton_percentage = ?2 WHERE id = ?3",
        params![color, cotton_percentage, id],
    )
}

/// Amounts of every row of a color whose cotton percentage compares to the threshold
///
/// Summing is left to the caller so an overflowing total is reported instead
/// of failing inside SQLite.
pub fn matching_amounts(
    conn: &Connection,
    color: &str,
    cotton_percentage: f64,
    operator: Operator,
) -> DbResult<Vec<i64>> {
    let sql = format!(
        "SELECT amount FROM socks WHERE color = ?1 AND cotton_percentage {} ?2",
        operator.sql_symbol()
    );
    let mut stmt = conn.prepare(&sql)?;
    let amounts: DbResult<Vec<i64>> = stmt
        .query_map(params![color, cotton_percentage], |row| row.get(0))?
        .collect();
    amounts
}

/// Count rows matching a filter
pub fn count_filtered(conn: &Connection, filter: &SockFilter) -> DbResult<u64> {
    let (where_sql, params) = filter.where_clause();
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM socks{where_sql}"),
        params_from_iter(params.iter()),
        |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
}

/// Fetch one sorted page of rows matching a filter
pub fn find_filtered(
    conn: &Connection,
    filter: &SockFilter,
    page: &PageRequest,
) -> DbResult<Vec<Sock>> {
    let (where_sql, mut params) = filter.where_clause();
    params.push(rusqlite::types::Value::Integer(i64::from(page.size())));
    params.push(rusqlite::types::Value::Integer(page.offset()));

    let sql = format!(
        "SELECT {SOCK_COLUMNS} FROM socks{where_sql}{}",
        page.order_and_limit()
    );
    let mut stmt = conn.prepare(&sql)?;
    let results: DbResult<Vec<Sock>> = stmt
        .query_map(params_from_iter(params.iter()), sock_from_row)?
        .collect();
    results
}

/// Get total count of sock records
pub fn get_sock_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM socks", [], |row| row.get(0))
}
