//! Inventory operations: arrivals, departures, updates, amount queries,
//! bulk import and filtered listing.
//!
//! Every write runs in its own transaction. Callers hand in the connection;
//! the web layer serializes access behind a mutex.

use log::info;
use rusqlite::Connection;

use crate::database;
use crate::error::{InventoryError, Result};
use crate::import::{self, FileFormat};
use crate::models::{Sock, SockBatch, SockUpdate};
use crate::query::{Operator, Page, PageRequest, SockFilter};

/// Outcome of a bulk import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub file_name: String,
    pub inserted: usize,
}

/// Registers incoming socks.
///
/// Adds to the existing bucket for (color, cotton percentage) or creates one.
pub fn record_arrival(conn: &mut Connection, batch: &SockBatch) -> Result<Sock> {
    info!(
        "Arrival of socks: color={}, cotton={}, amount={}",
        batch.color, batch.cotton_percentage, batch.amount
    );
    let tx = conn.transaction()?;

    let sock = match database::find_by_color_and_cotton(&tx, &batch.color, batch.cotton_percentage)? {
        Some(mut existing) => {
            existing.amount = existing.amount.checked_add(batch.amount).ok_or_else(|| {
                InventoryError::InvalidArgument("Resulting amount of socks is too large".to_string())
            })?;
            database::set_amount(&tx, existing.id, existing.amount)?;
            existing
        }
        None => database::insert_sock(&tx, batch)?,
    };

    tx.commit()?;
    Ok(sock)
}

/// Registers outgoing socks.
///
/// The bucket must exist and hold at least the requested amount; otherwise
/// nothing is written.
pub fn record_departure(conn: &mut Connection, batch: &SockBatch) -> Result<Sock> {
    info!(
        "Departure of socks: color={}, cotton={}, amount={}",
        batch.color, batch.cotton_percentage, batch.amount
    );
    let tx = conn.transaction()?;

    let mut existing = database::find_by_color_and_cotton(&tx, &batch.color, batch.cotton_percentage)?
        .ok_or_else(|| {
            InventoryError::NotFound("No socks of this type found in stock".to_string())
        })?;

    if existing.amount < batch.amount {
        return Err(InventoryError::InsufficientStock {
            requested: batch.amount,
            available: existing.amount,
        });
    }

    existing.amount -= batch.amount;
    database::set_amount(&tx, existing.id, existing.amount)?;

    tx.commit()?;
    Ok(existing)
}

/// Replaces color and cotton percentage of a record; amount stays as is.
pub fn update_sock(conn: &mut Connection, id: i64, update: &SockUpdate) -> Result<Sock> {
    info!("Updating socks with id {}", id);
    let tx = conn.transaction()?;

    let mut sock = database::find_by_id(&tx, id)?
        .ok_or_else(|| InventoryError::NotFound(format!("No socks found with id {}", id)))?;

    database::set_color_and_cotton(&tx, id, &update.color, update.cotton_percentage)?;
    sock.color = update.color.clone();
    sock.cotton_percentage = update.cotton_percentage;

    tx.commit()?;
    Ok(sock)
}

/// Total amount of a color whose cotton percentage satisfies the operator.
///
/// A zero total is reported as `NotFound`; a total beyond `i64` as
/// `InvalidArgument`.
pub fn query_amount(
    conn: &Connection,
    color: &str,
    cotton_percentage: f64,
    operator: Operator,
) -> Result<i64> {
    let total = database::matching_amounts(conn, color, cotton_percentage, operator)?
        .into_iter()
        .try_fold(0i64, i64::checked_add)
        .ok_or_else(|| {
            InventoryError::InvalidArgument("Total amount of socks is too large".to_string())
        })?;
    info!(
        "Amount of socks for color={}, cotton {} {}: {}",
        color, operator, cotton_percentage, total
    );

    if total == 0 {
        return Err(InventoryError::NotFound(
            "No socks found matching the filter".to_string(),
        ));
    }
    Ok(total)
}

/// Inserts every row of an uploaded file as a new record.
///
/// Rows are not merged into existing buckets. Nothing is inserted unless the
/// whole file parses.
pub fn bulk_import(conn: &mut Connection, file_name: &str, content: &[u8]) -> Result<ImportSummary> {
    info!("Started processing file: {}", file_name);
    let format = FileFormat::from_file_name(file_name)?;
    let batches = import::parse_file(format, content)?;

    let tx = conn.transaction()?;
    let inserted = database::insert_socks(&tx, &batches)?;
    tx.commit()?;

    info!("Finished processing file: {} ({} records)", file_name, inserted);
    Ok(ImportSummary {
        file_name: file_name.to_string(),
        inserted,
    })
}

/// One page of records matching the filter, in the requested order.
pub fn query_filtered(
    conn: &Connection,
    filter: &SockFilter,
    page: &PageRequest,
) -> Result<Page<Sock>> {
    let total = database::count_filtered(conn, filter)?;
    let content = database::find_filtered(conn, filter, page)?;
    Ok(Page::new(content, page, total))
}
