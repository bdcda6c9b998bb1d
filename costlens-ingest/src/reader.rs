//! CSV reader: header row, trimmed keys, blank-line skipping and scalar type inference.
//!
//! Expected layout (only `id`, `type`, `amount` and `date` are interpreted):
//!   id,type,amount,date,description,locationName,balance
//!   1,SMS,0.0079,June 1st 2024,Outbound message,Main,12.40

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use costlens_core::{CellValue, RawRow};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Files above this size still load, but a warning is logged.
pub const ADVISORY_MAX_BYTES: u64 = 50 * 1024 * 1024;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-?(\d+\.?|\.\d+|\d+\.\d+)([eE][-+]?\d+)?\s*$").expect("number pattern")
});

/// Infer a scalar from one raw cell.
pub fn infer_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }
    if NUMBER_RE.is_match(raw) {
        if let Ok(n) = raw.trim().parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }
    }
    CellValue::Text(raw.to_string())
}

/// Check the file extension and size before reading.
///
/// Only `.csv` is accepted. Returns the file size in bytes.
pub fn check_file(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(IngestError::UnsupportedFileType(path.display().to_string()));
    }

    let size = std::fs::metadata(path)
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > ADVISORY_MAX_BYTES {
        warn!(
            path = %path.display(),
            size,
            "file is larger than the advised 50MB; loading it fully into memory"
        );
    }
    Ok(size)
}

/// Read rows from any CSV source. The first row is the header.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            skipped += 1;
            continue;
        }

        // Short rows leave trailing columns absent; extra cells are ignored
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| (key.clone(), infer_cell(cell)))
            .collect();
        rows.push(row);
    }

    debug!(columns = headers.len(), rows = rows.len(), skipped, "read csv");
    Ok(rows)
}

/// Read rows from a CSV file on disk.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}
