//! Bulk import of sock batches from uploaded CSV or XLSX files.
//!
//! Both formats use the same layout: one header row, then one batch per row
//! with the columns color, cotton percentage, amount.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use log::{debug, info, warn};

use crate::error::{InventoryError, Result};
use crate::models::SockBatch;

/// Supported upload formats, chosen by file-name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        if file_name.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else if file_name.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else {
            warn!("Unsupported file format: {file_name}");
            Err(InventoryError::InvalidArgument(
                "Unsupported file format. Only .xlsx and .csv are supported".to_string(),
            ))
        }
    }
}

/// Parses every data row of the file; any bad row fails the whole file.
pub fn parse_file(format: FileFormat, content: &[u8]) -> Result<Vec<SockBatch>> {
    let batches = match format {
        FileFormat::Csv => parse_csv(content)?,
        FileFormat::Xlsx => parse_xlsx(content)?,
    };
    info!("Parsed {} sock batches from {:?} file", batches.len(), format);
    Ok(batches)
}

pub fn parse_csv(content: &[u8]) -> Result<Vec<SockBatch>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut batches = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // records are 0-based and the header occupies line 1
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        if record.iter().all(|field| field.is_empty()) {
            debug!("Line {line}: empty row skipped");
            continue;
        }

        let color = csv_field(&record, 0, "color", line)?;
        let cotton_percentage = parse_number(csv_field(&record, 1, "cotton percentage", line)?)
            .ok_or_else(|| import_error(line, "cotton percentage is not a number"))?;
        let amount = parse_amount(csv_field(&record, 2, "amount", line)?)
            .ok_or_else(|| import_error(line, "amount is not a whole number"))?;

        batches.push(row_batch(color.to_string(), cotton_percentage, amount, line)?);
    }

    Ok(batches)
}

pub fn parse_xlsx(content: &[u8]) -> Result<Vec<SockBatch>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| import_error(1, "workbook has no sheets"))??;

    let mut batches = Vec::new();
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    for (index, row) in range.rows().enumerate().skip(1) {
        let line = first_row + index + 1;

        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            debug!("Line {line}: empty row skipped");
            continue;
        }

        let color = cell_text(row.get(0))
            .ok_or_else(|| import_error(line, "color cell is not text"))?;
        let cotton_percentage = cell_number(row.get(1))
            .ok_or_else(|| import_error(line, "cotton percentage cell is not a number"))?;
        let amount = cell_number(row.get(2))
            .filter(|value| value.fract() == 0.0)
            .map(|value| value as i64)
            .ok_or_else(|| import_error(line, "amount cell is not a whole number"))?;

        batches.push(row_batch(color, cotton_percentage, amount, line)?);
    }

    Ok(batches)
}

fn row_batch(color: String, cotton_percentage: f64, amount: i64, line: usize) -> Result<SockBatch> {
    let batch = SockBatch::new(color, cotton_percentage, amount);
    batch
        .validate_stored()
        .map_err(|e| import_error(line, &e.to_string()))?;
    Ok(batch)
}

fn csv_field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<&'r str> {
    record
        .get(index)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| import_error(line, &format!("missing {name}")))
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_amount(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) => Some(s.trim().to_string()),
        _ => None,
    }
}

fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_number(s.trim()),
        _ => None,
    }
}

fn import_error(line: usize, reason: &str) -> InventoryError {
    warn!("Import rejected at line {line}: {reason}");
    InventoryError::Import {
        line,
        reason: reason.to_string(),
    }
}
