//! `x,y` text ingest.
//!
//! Turns a text file with one `x,y` pair per line into a `PointSet` that is safe
//! to fit: every point has two finite coordinates.
//!
//! - Malformed lines are skipped and reported (`RowError` + a `warn!`); they never
//!   abort the run and never contribute a placeholder point.
//! - Blank lines are ignored.
//! - Input order is preserved.
//! - I/O failures (open/read) are hard errors.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, warn};

use crate::domain::{Point, PointSet};
use crate::error::AppError;

/// A line that was skipped during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the source.
    pub line: usize,
    /// Line content as read (fields re-joined with `,`).
    pub content: String,
    pub message: String,
}

/// Ingest output: parsed points + skipped lines.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: PointSet,
    pub row_errors: Vec<RowError>,
    /// Non-blank lines seen.
    pub rows_read: usize,
}

impl IngestedPoints {
    pub fn rows_used(&self) -> usize {
        self.points.len()
    }
}

/// Load points from a file.
pub fn load_points(path: &Path) -> Result<IngestedPoints, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Could not read '{}': {e}", path.display())))?;
    let ingested = read_points(file)
        .map_err(|e| AppError::new(2, format!("Could not scan '{}': {e}", path.display())))?;
    debug!(
        "read {} lines from '{}': {} points, {} skipped",
        ingested.rows_read,
        path.display(),
        ingested.rows_used(),
        ingested.row_errors.len()
    );
    Ok(ingested)
}

/// Parse `x,y` lines from any reader.
///
/// Only I/O errors from the underlying reader fail the call; everything else is
/// a row-level error.
pub fn read_points<R: Read>(reader: R) -> Result<IngestedPoints, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                rows_read += 1;
                let line = e.position().map(|p| p.line() as usize).unwrap_or(idx + 1);
                reject(&mut row_errors, line, String::new(), format!("unreadable line: {e}"));
                continue;
            }
        };
        // Empty lines never reach us, but whitespace-only ones trim to a single empty field.
        if is_blank(&record) {
            continue;
        }
        rows_read += 1;

        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 1);
        match parse_record(&record) {
            Ok(point) => points.push(point),
            Err(message) => reject(&mut row_errors, line, join_fields(&record), message),
        }
    }

    Ok(IngestedPoints {
        points: PointSet::new(points),
        row_errors,
        rows_read,
    })
}

fn reject(row_errors: &mut Vec<RowError>, line: usize, content: String, message: String) {
    warn!("discarding incorrect data point on line {line} {content:?}: {message}");
    row_errors.push(RowError { line, content, message });
}

fn parse_record(record: &StringRecord) -> Result<Point, String> {
    if record.len() != 2 {
        return Err(format!("expected 2 fields `x,y`, found {}", record.len()));
    }
    let x = parse_coordinate(&record[0], "x")?;
    let y = parse_coordinate(&record[1], "y")?;
    Point::finite(x, y).ok_or_else(|| "non-finite coordinate".to_string())
}

fn parse_coordinate(field: &str, name: &str) -> Result<f64, String> {
    if field.is_empty() {
        return Err(format!("missing `{name}` value"));
    }
    field
        .parse::<f64>()
        .map_err(|e| format!("invalid `{name}` value '{field}': {e}"))
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

fn join_fields(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}
