// ABOUTME: Reads provider exports from disk into raw activity batches
// ABOUTME: Accepts CSV files with a header row or JSON arrays of activity objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use csv::Reader;
use loadwise::domain::models::SourceProvider;
use loadwise::providers::{RawBatch, RawFields};
use loadwise::{AppError, AppResult};
use serde_json::Value;
use tracing::debug;

/// Export file formats the reader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated with a header row
    Csv,
    /// JSON array of objects
    Json,
}

impl ExportFormat {
    /// Format implied by the file extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for extensions other than `.csv` and `.json`
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::invalid_input(format!(
                "{}: expected a .csv or .json export",
                path.display()
            ))),
        }
    }
}

/// Read one export file as a batch for `provider`
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not a CSV/JSON
/// collection of activity rows
pub fn read_batch(provider: SourceProvider, path: &Path) -> AppResult<RawBatch> {
    let activities = match ExportFormat::from_path(path)? {
        ExportFormat::Csv => read_csv(path)?,
        ExportFormat::Json => read_json(path)?,
    };
    debug!(
        provider = %provider,
        path = %path.display(),
        rows = activities.len(),
        "Read export"
    );
    Ok(RawBatch::new(provider.as_str(), activities))
}

/// Read a CSV export; empty cells become `null`, everything else stays a string
///
/// # Errors
///
/// Returns an error when the file cannot be opened or a row is malformed
pub fn read_csv(path: &Path) -> AppResult<Vec<RawFields>> {
    let mut reader = Reader::from_path(path).map_err(|e| {
        AppError::io(format!("Failed to open {}: {e}", path.display())).with_source(e)
    })?;
    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_input(format!("{}: {e}", path.display())).with_source(e))?
        .clone();

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row
            .map_err(|e| AppError::invalid_input(format!("{}: {e}", path.display())).with_source(e))?;
        let fields: RawFields = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.to_owned(), cell_value(cell)))
            .collect();
        rows.push(fields);
    }
    Ok(rows)
}

/// Read a JSON export holding an array of activity objects
///
/// # Errors
///
/// Returns an error when the file cannot be read, is not valid JSON, or is
/// not an array of objects
pub fn read_json(path: &Path) -> AppResult<Vec<RawFields>> {
    let text = fs::read_to_string(path)?;
    let Value::Array(items) = serde_json::from_str::<Value>(&text)? else {
        return Err(AppError::invalid_input(format!(
            "{}: expected a JSON array of activity objects",
            path.display()
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(fields),
            _ => Err(AppError::invalid_input(format!(
                "{}: element {index} is not an object",
                path.display()
            ))),
        })
        .collect()
}

fn cell_value(cell: &str) -> Value {
    if cell.trim().is_empty() {
        Value::Null
    } else {
        Value::String(cell.to_owned())
    }
}
