//! Aggregation engine: groups clean records into category totals, daily
//! totals and a grand summary.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::NaiveDate;
use costlens_core::{
    display_date, round_to_cents, CategoryTotal, CleanRecord, DailyTotal, Summary,
    DEFAULT_DISPLAY_FORMAT, DEFAULT_LABEL_MAX_CHARS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::highlights::Highlights;

/// Number of most recent days kept in the daily view
pub const DEFAULT_DAILY_WINDOW: usize = 30;

/// Knobs for presentation-facing fields of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOptions {
    pub label_max_chars: usize,
    pub daily_window: usize,
    pub display_date_format: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            daily_window: DEFAULT_DAILY_WINDOW,
            display_date_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}

/// Everything the dashboard views are drawn from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Descending by total cost
    pub category_totals: Vec<CategoryTotal>,
    /// Ascending by date, most recent days only
    pub daily_totals: Vec<DailyTotal>,
    pub summary: Summary,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.summary.record_count == 0
    }

    /// The `n` most expensive categories
    pub fn top_categories(&self, n: usize) -> &[CategoryTotal] {
        &self.category_totals[..n.min(self.category_totals.len())]
    }

    /// The `n` most recent days, still in ascending order
    pub fn recent_days(&self, n: usize) -> &[DailyTotal] {
        let start = self.daily_totals.len().saturating_sub(n);
        &self.daily_totals[start..]
    }

    pub fn highlights(&self) -> Highlights<'_> {
        Highlights::from_report(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    total: f64,
    count: usize,
}

impl Bucket {
    fn add(self, amount: f64) -> Self {
        Self {
            total: self.total + amount,
            count: self.count + 1,
        }
    }
}

/// Aggregate with default options.
pub fn aggregate(records: &[CleanRecord]) -> Report {
    aggregate_with(records, &AggregateOptions::default())
}

pub fn aggregate_with(records: &[CleanRecord], options: &AggregateOptions) -> Report {
    let report = Report {
        category_totals: category_totals(records, options.label_max_chars),
        daily_totals: daily_totals(records, options.daily_window, &options.display_date_format),
        summary: summarize(records),
    };

    debug!(
        records = records.len(),
        categories = report.category_totals.len(),
        days = report.daily_totals.len(),
        total = report.summary.total_cost,
        "aggregated records"
    );
    report
}

/// Group by category, keeping first-seen order so equal totals stay in
/// encounter order after the stable sort.
pub fn category_totals(records: &[CleanRecord], label_max_chars: usize) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = group_in_encounter_order(records, CleanRecord::category)
        .into_iter()
        .map(|(category, b)| CategoryTotal::new(category, round_to_cents(b.total), b.count, label_max_chars))
        .collect();

    totals.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    totals
}

/// Group dated records by day and keep the `window` most recent days present.
pub fn daily_totals(records: &[CleanRecord], window: usize, display_format: &str) -> Vec<DailyTotal> {
    // ISO keys sort chronologically
    let days: BTreeMap<&str, Bucket> = records
        .iter()
        .filter_map(|r| r.date_key.as_deref().map(|key| (key, r.amount)))
        .fold(BTreeMap::new(), |mut acc, (key, amount)| {
            let bucket = acc.entry(key).or_insert_with(Bucket::default);
            *bucket = bucket.add(amount);
            acc
        });

    let skip = days.len().saturating_sub(window);
    days.into_iter()
        .skip(skip)
        .map(|(key, b)| DailyTotal {
            date_key: key.to_string(),
            display_date: NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .map(|d| display_date(d, display_format))
                .unwrap_or_else(|_| key.to_string()),
            total_cost: round_to_cents(b.total),
            count: b.count,
        })
        .collect()
}

/// Grand totals over every record, dated or not.
pub fn summarize(records: &[CleanRecord]) -> Summary {
    let total: f64 = records.iter().map(|r| r.amount).sum();
    Summary::new(round_to_cents(total), records.len())
}

fn group_in_encounter_order<K, F>(records: &[CleanRecord], key_of: F) -> Vec<(K, Bucket)>
where
    K: Eq + Hash + Clone,
    F: Fn(&CleanRecord) -> K,
{
    let (_, groups) = records.iter().fold(
        (HashMap::<K, usize>::new(), Vec::<(K, Bucket)>::new()),
        |(mut index, mut groups), record| {
            let key = key_of(record);
            let slot = match index.get(&key) {
                Some(&i) => i,
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, Bucket::default()));
                    groups.len() - 1
                }
            };
            groups[slot].1 = groups[slot].1.add(record.amount);
            (index, groups)
        },
    );
    groups
}
