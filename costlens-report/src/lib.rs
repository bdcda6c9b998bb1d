//! costlens-report: aggregation engine and derived highlights

pub mod aggregate;
pub mod highlights;

pub use aggregate::{
    aggregate, aggregate_with, category_totals, daily_totals, summarize, AggregateOptions, Report,
    DEFAULT_DAILY_WINDOW,
};
pub use highlights::{largest_category, most_frequent_category, peak_day, Highlights};
