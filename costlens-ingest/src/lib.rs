//! costlens-ingest: CSV reading and record normalization.

pub mod error;
pub mod ingestor;
pub mod reader;

use std::path::Path;

use costlens_core::CleanRecord;

pub use error::{IngestError, Result};
pub use ingestor::{ingest, ingest_with_stats, IngestStats};
pub use reader::{check_file, infer_cell, read_csv, read_csv_path, ADVISORY_MAX_BYTES};

/// Fail with [`IngestError::NoValidData`] when ingestion kept nothing.
pub fn require_records(records: Vec<CleanRecord>) -> Result<Vec<CleanRecord>> {
    if records.is_empty() {
        return Err(IngestError::NoValidData);
    }
    Ok(records)
}

/// Parse and ingest CSV bytes that were already read into memory.
///
/// An empty result is not an error here so callers can still report the
/// stats; pass the records through [`require_records`] before aggregating.
pub fn records_from_bytes(bytes: &[u8]) -> Result<(Vec<CleanRecord>, IngestStats)> {
    let rows = read_csv(bytes)?;
    Ok(ingest_with_stats(rows))
}

/// Check, read and ingest a CSV file in one go.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<CleanRecord>> {
    let path = path.as_ref();
    check_file(path)?;
    let rows = read_csv_path(path)?;
    require_records(ingest(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rows_rejected_is_no_valid_data() {
        let data = "id,type,amount\n,SMS,1\n,Call,2\n";
        let (records, stats) = records_from_bytes(data.as_bytes()).unwrap();
        assert_eq!((stats.total_rows, stats.rejected, stats.kept), (2, 2, 0));
        let err = require_records(records).unwrap_err();
        assert!(matches!(err, IngestError::NoValidData));
        assert!(err.to_string().contains("No valid data"));
    }

    #[test]
    fn test_header_without_amount_is_no_valid_data() {
        let data = "id,type,cost\n1,SMS,1\n";
        let (records, _) = records_from_bytes(data.as_bytes()).unwrap();
        assert!(matches!(
            require_records(records),
            Err(IngestError::NoValidData)
        ));
    }

    #[test]
    fn test_records_from_bytes_reports_stats() {
        let data = "id,type,amount,date\n1,SMS,0.5,2024-01-01\n,SMS,1,2024-01-01\n3,Call,oops,\n";
        let (records, stats) = records_from_bytes(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(stats.total_rows, 3);
        assert_eq!(stats.rejected, 1);
        assert_eq!(records[1].amount, 0.0);
    }

    #[test]
    fn test_load_records_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costs.csv");
        std::fs::write(&path, "id,amount,date\n1,10,2024-02-01\n").unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date_key.as_deref(), Some("2024-02-01"));

        let txt = dir.path().join("costs.txt");
        std::fs::write(&txt, "id,amount\n1,10\n").unwrap();
        assert!(matches!(
            load_records(&txt),
            Err(IngestError::UnsupportedFileType(_))
        ));
    }
}
