//! Record ingestion: turns raw CSV rows into clean, aggregatable records.
//!
//! Per-row problems never fail the batch. A row without an `id`, or without
//! an `amount` column at all, is dropped; an unparsable amount becomes 0 and
//! an unparsable date becomes `None`.

use costlens_core::{parse_amount_text, parse_date, CellValue, CleanRecord, RawRow};
use serde::Serialize;
use tracing::debug;

/// Row counts from one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub total_rows: usize,
    /// Missing `id` or `amount`
    pub rejected: usize,
    /// Neither a date nor a usable amount
    pub filtered: usize,
    pub kept: usize,
}

/// Normalize raw rows into clean records.
///
/// An empty result means nothing in the input was usable.
pub fn ingest(rows: impl IntoIterator<Item = RawRow>) -> Vec<CleanRecord> {
    ingest_with_stats(rows).0
}

/// Same as [`ingest`], also reporting how many rows were dropped and why.
pub fn ingest_with_stats(rows: impl IntoIterator<Item = RawRow>) -> (Vec<CleanRecord>, IngestStats) {
    let mut stats = IngestStats::default();
    let mut records = Vec::new();

    for raw in rows {
        stats.total_rows += 1;
        let row = trim_keys(raw);

        if !has_id(&row) || !row.contains_key("amount") {
            stats.rejected += 1;
            continue;
        }

        let record = normalize(row);
        if record.parsed_date.is_some() || record.amount.is_finite() {
            records.push(record);
        } else {
            stats.filtered += 1;
        }
    }

    stats.kept = records.len();
    debug!(
        total = stats.total_rows,
        rejected = stats.rejected,
        filtered = stats.filtered,
        kept = stats.kept,
        "ingested rows"
    );
    (records, stats)
}

fn trim_keys(row: RawRow) -> RawRow {
    row.into_iter()
        .map(|(key, value)| (key.trim().to_string(), value))
        .collect()
}

fn has_id(row: &RawRow) -> bool {
    match row.get("id") {
        None | Some(CellValue::Null) => false,
        Some(CellValue::Bool(b)) => *b,
        Some(CellValue::Number(n)) => !n.is_nan(),
        Some(CellValue::Text(s)) => !s.trim().is_empty(),
    }
}

fn normalize(row: RawRow) -> CleanRecord {
    let amount = row.get("amount").map(coerce_amount).unwrap_or(0.0);
    let parsed_date = row
        .get("date")
        .and_then(CellValue::as_text)
        .and_then(|s| parse_date(&s));
    CleanRecord::new(row, amount, parsed_date)
}

fn coerce_amount(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) if n.is_finite() => *n,
        CellValue::Text(s) => parse_amount_text(s).unwrap_or(0.0),
        _ => 0.0,
    }
}
