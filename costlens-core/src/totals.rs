//! Aggregate output types: category totals, daily totals and the grand summary.

use serde::{Deserialize, Serialize};

/// Category label used when a record has no `type`.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Default maximum label width before truncation.
pub const DEFAULT_LABEL_MAX_CHARS: usize = 25;

const ELLIPSIS: &str = "...";

/// Spend grouped by category (`type` column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Full, untruncated category name
    pub category: String,
    /// Short label for chart axes
    pub display_label: String,
    /// Rounded to 2 decimals
    pub total_cost: f64,
    pub count: usize,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total_cost: f64, count: usize, label_max_chars: usize) -> Self {
        let category = category.into();
        Self {
            display_label: truncate_label(&category, label_max_chars),
            category,
            total_cost,
            count,
        }
    }

    /// Mean cost per record in this category
    pub fn average_cost(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_cost / self.count as f64
        }
    }

    /// Percentage of `grand_total` this category accounts for
    pub fn share_of(&self, grand_total: f64) -> f64 {
        if grand_total == 0.0 {
            0.0
        } else {
            self.total_cost / grand_total * 100.0
        }
    }
}

/// Spend grouped by calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    /// ISO `YYYY-MM-DD`
    pub date_key: String,
    pub display_date: String,
    pub total_cost: f64,
    pub count: usize,
}

/// Totals over every clean record, dated or not
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_cost: f64,
    pub record_count: usize,
    /// Not rounded
    pub average_cost: f64,
}

impl Summary {
    pub fn new(total_cost: f64, record_count: usize) -> Self {
        let average_cost = if record_count > 0 {
            total_cost / record_count as f64
        } else {
            0.0
        };
        Self {
            total_cost,
            record_count,
            average_cost,
        }
    }
}

/// Cut `label` to `max_chars` characters and mark the cut with an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}
