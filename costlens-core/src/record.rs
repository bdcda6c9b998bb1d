//! Normalized record types produced by ingestion

use chrono::NaiveDate;
use serde::Serialize;

use crate::time::date_key;
use crate::totals::UNKNOWN_CATEGORY;
use crate::value::{CellValue, RawRow};

/// A validated row ready for aggregation.
///
/// Always carries an `id` and a finite `amount`; the date may be missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRecord {
    /// Every column of the source row, keys trimmed
    pub row: RawRow,
    /// Parsed amount, 0 when the cell was unparsable
    pub amount: f64,
    pub parsed_date: Option<NaiveDate>,
    /// ISO `YYYY-MM-DD`, present exactly when `parsed_date` is
    pub date_key: Option<String>,
}

impl CleanRecord {
    pub fn new(row: RawRow, amount: f64, parsed_date: Option<NaiveDate>) -> Self {
        Self {
            row,
            amount,
            date_key: parsed_date.map(date_key),
            parsed_date,
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.row.get(column)
    }

    /// Grouping key from the `type` column, defaulting to [`UNKNOWN_CATEGORY`]
    pub fn category(&self) -> String {
        match self.row.get("type") {
            Some(v) if v.is_present() => v.to_string().trim().to_string(),
            _ => UNKNOWN_CATEGORY.to_string(),
        }
    }
}
