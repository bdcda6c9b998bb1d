//! Single-item callouts derived from a [`Report`].
//!
//! Ties go to the first item in report order: the earlier category in the
//! cost-sorted list, or the earlier day.

use costlens_core::{CategoryTotal, DailyTotal};
use serde::Serialize;

use crate::aggregate::Report;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights<'a> {
    pub largest_category: Option<&'a CategoryTotal>,
    pub most_frequent_category: Option<&'a CategoryTotal>,
    pub peak_day: Option<&'a DailyTotal>,
}

impl<'a> Highlights<'a> {
    pub fn from_report(report: &'a Report) -> Self {
        Self {
            largest_category: largest_category(&report.category_totals),
            most_frequent_category: most_frequent_category(&report.category_totals),
            peak_day: peak_day(&report.daily_totals),
        }
    }
}

/// First entry of the cost-sorted category list
pub fn largest_category(totals: &[CategoryTotal]) -> Option<&CategoryTotal> {
    totals.first()
}

pub fn most_frequent_category(totals: &[CategoryTotal]) -> Option<&CategoryTotal> {
    first_max_by_key(totals, |t| t.count)
}

pub fn peak_day(days: &[DailyTotal]) -> Option<&DailyTotal> {
    first_max_by(days, |d| d.total_cost)
}

fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().fold(None, |best: Option<&T>, item| match best {
        Some(b) if key(b) >= key(item) => Some(b),
        _ => Some(item),
    })
}

fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    items.iter().fold(None, |best: Option<&T>, item| match best {
        Some(b) if key(b).total_cmp(&key(item)).is_ge() => Some(b),
        _ => Some(item),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, total: f64, count: usize) -> CategoryTotal {
        CategoryTotal::new(name, total, count, 25)
    }

    fn day(key: &str, total: f64) -> DailyTotal {
        DailyTotal {
            date_key: key.to_string(),
            display_date: key.to_string(),
            total_cost: total,
            count: 1,
        }
    }

    #[test]
    fn test_empty_report_has_no_highlights() {
        let report = Report {
            category_totals: vec![],
            daily_totals: vec![],
            summary: Default::default(),
        };
        let h = report.highlights();
        assert!(h.largest_category.is_none());
        assert!(h.most_frequent_category.is_none());
        assert!(h.peak_day.is_none());
    }

    #[test]
    fn test_largest_is_first() {
        let totals = vec![cat("B", 20.0, 1), cat("A", 15.01, 2)];
        assert_eq!(largest_category(&totals).unwrap().category, "B");
        assert_eq!(most_frequent_category(&totals).unwrap().category, "A");
    }

    #[test]
    fn test_frequency_tie_goes_to_first() {
        let totals = vec![cat("B", 20.0, 3), cat("A", 10.0, 3), cat("C", 5.0, 1)];
        assert_eq!(most_frequent_category(&totals).unwrap().category, "B");
    }

    #[test]
    fn test_peak_day_tie_goes_to_earliest() {
        let days = vec![day("2024-01-01", 9.0), day("2024-01-02", 12.5), day("2024-01-03", 12.5)];
        assert_eq!(peak_day(&days).unwrap().date_key, "2024-01-02");
    }

    #[test]
    fn test_highlights_serialize() {
        let report = Report {
            category_totals: vec![cat("SMS", 4.0, 2)],
            daily_totals: vec![day("2024-01-01", 4.0)],
            summary: costlens_core::Summary::new(4.0, 2),
        };
        let json = serde_json::to_value(report.highlights()).unwrap();
        assert_eq!(json["largestCategory"]["category"], "SMS");
        assert_eq!(json["peakDay"]["dateKey"], "2024-01-01");
    }
}
