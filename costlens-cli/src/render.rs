//! Plain-text rendering of the dashboard views.

use clap::ValueEnum;
use costlens_report::Report;
use std::fmt::Write;

/// Number of category cards under the overview chart
const OVERVIEW_CARDS: usize = 6;
const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    Overview,
    ByType,
    Timeline,
    Breakdown,
    All,
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub top_categories: usize,
    pub recent_days: usize,
}

pub fn render(report: &Report, view: View, limits: Limits) -> String {
    let mut out = String::new();
    summary_cards(&mut out, report);
    match view {
        View::Overview => overview(&mut out, report, limits),
        View::ByType => by_type(&mut out, report),
        View::Timeline => timeline(&mut out, report, limits),
        View::Breakdown => breakdown(&mut out, report, limits),
        View::All => {
            overview(&mut out, report, limits);
            by_type(&mut out, report);
            timeline(&mut out, report, limits);
            breakdown(&mut out, report, limits);
        }
    }
    out
}

fn summary_cards(out: &mut String, report: &Report) {
    let s = &report.summary;
    let _ = writeln!(out, "Total Spending:          {}", format_money(s.total_cost));
    let _ = writeln!(out, "Total Transactions:      {}", format_count(s.record_count));
    let _ = writeln!(out, "Average per Transaction: ${:.6}", s.average_cost);
}

fn overview(out: &mut String, report: &Report, limits: Limits) {
    let _ = writeln!(out, "\n## Cost Overview\n");
    let top = report.top_categories(limits.top_categories);
    let max = top.first().map(|c| c.total_cost).unwrap_or(0.0);
    for c in top {
        let _ = writeln!(
            out,
            "{:<28} {:<width$} {}",
            c.display_label,
            bar(c.total_cost, max),
            format_money(c.total_cost),
            width = BAR_WIDTH
        );
    }

    let _ = writeln!(out);
    for c in report.top_categories(OVERVIEW_CARDS) {
        let _ = writeln!(
            out,
            "- {}: {} ({} transactions)",
            c.category,
            format_money(c.total_cost),
            format_count(c.count)
        );
    }
}

fn by_type(out: &mut String, report: &Report) {
    let total = report.summary.total_cost;
    let _ = writeln!(out, "\n## Costs by Service Type\n");
    let _ = writeln!(
        out,
        "{:<40} {:>14} {:>12} {:>14} {:>10}",
        "Service Type", "Total Cost", "Transactions", "Avg Cost", "% of Total"
    );
    for c in &report.category_totals {
        let _ = writeln!(
            out,
            "{:<40} {:>14} {:>12} {:>14} {:>9.1}%",
            c.category,
            format_money(c.total_cost),
            format_count(c.count),
            format!("${:.6}", c.average_cost()),
            c.share_of(total)
        );
    }
}

fn timeline(out: &mut String, report: &Report, limits: Limits) {
    let _ = writeln!(out, "\n## Daily Cost Timeline\n");
    if report.daily_totals.is_empty() {
        let _ = writeln!(out, "(no dated records)");
        return;
    }
    let max = report
        .daily_totals
        .iter()
        .map(|d| d.total_cost)
        .fold(0.0, f64::max);
    for d in &report.daily_totals {
        let _ = writeln!(
            out,
            "{:<12} {:<width$} {}",
            d.display_date,
            bar(d.total_cost, max),
            format_money(d.total_cost),
            width = BAR_WIDTH
        );
    }

    let _ = writeln!(out, "\n### Recent Daily Summary\n");
    for d in report.recent_days(limits.recent_days) {
        let _ = writeln!(
            out,
            "- {}: {} ({} transactions)",
            d.display_date,
            format_money(d.total_cost),
            d.count
        );
    }
}

fn breakdown(out: &mut String, report: &Report, limits: Limits) {
    let total = report.summary.total_cost;
    let _ = writeln!(out, "\n## Cost Distribution\n");
    for c in report.top_categories(limits.top_categories) {
        let _ = writeln!(out, "- {}: {:.1}%", c.display_label, c.share_of(total));
    }

    let h = report.highlights();
    let _ = writeln!(out, "\nLargest Cost Category");
    if let Some(c) = h.largest_category {
        let _ = writeln!(
            out,
            "  {} {} ({:.1}% of total costs)",
            c.category,
            format_money(c.total_cost),
            c.share_of(total)
        );
    }
    let _ = writeln!(out, "Most Frequent Service");
    if let Some(c) = h.most_frequent_category {
        let _ = writeln!(out, "  {} {} transactions", c.category, format_count(c.count));
    }
    let _ = writeln!(out, "Peak Day");
    if let Some(d) = h.peak_day {
        let _ = writeln!(out, "  {} {}", d.display_date, format_money(d.total_cost));
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.clamp(1, BAR_WIDTH))
}

/// `$1,234.56`, with a leading minus for credits.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac}", group_thousands(whole))
}

pub fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use costlens_core::{parse_date, CleanRecord, RawRow};
    use costlens_report::aggregate;

    fn sample() -> Report {
        let rec = |id: &str, kind: &str, amount: f64, date: &str| {
            CleanRecord::new(
                RawRow::new().with("id", id).with("type", kind).with("amount", amount),
                amount,
                parse_date(date),
            )
        };
        aggregate(&[
            rec("1", "A", 10.005, "2024-01-01"),
            rec("2", "A", 5.0, "2024-01-01"),
            rec("3", "B", 20.0, "2024-01-02"),
        ])
    }

    const LIMITS: Limits = Limits {
        top_categories: 8,
        recent_days: 8,
    };

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(35.01), "$35.01");
        assert_eq!(format_money(1234567.5), "$1,234,567.50");
        assert_eq!(format_money(-12.5), "-$12.50");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_summary_cards_always_rendered() {
        let out = render(&sample(), View::Overview, LIMITS);
        assert!(out.contains("Total Spending:          $35.01"));
        assert!(out.contains("Total Transactions:      3"));
        assert!(out.contains("## Cost Overview"));
        assert!(!out.contains("## Daily Cost Timeline"));
    }

    #[test]
    fn test_breakdown_highlights() {
        let out = render(&sample(), View::Breakdown, LIMITS);
        assert!(out.contains("  B $20.00"));
        assert!(out.contains("  A 2 transactions"));
        assert!(out.contains("  1/2/2024 $20.00"));
    }

    #[test]
    fn test_by_type_table() {
        let out = render(&sample(), View::ByType, LIMITS);
        assert!(out.contains("Service Type"));
        assert!(out.contains("$7.505000"));
    }

    #[test]
    fn test_empty_report_renders() {
        let out = render(&aggregate(&[]), View::All, LIMITS);
        assert!(out.contains("(no dated records)"));
        assert!(out.contains("Average per Transaction: $0.000000"));
    }
}
