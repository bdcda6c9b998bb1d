//! costlens-core: data model and normalization helpers for cost reports

pub mod money;
pub mod record;
pub mod time;
pub mod totals;
pub mod value;

pub use money::{parse_amount_text, round_to_cents};
pub use record::CleanRecord;
pub use time::{date_key, display_date, parse_date, strip_ordinals, DEFAULT_DISPLAY_FORMAT};
pub use totals::{
    truncate_label, CategoryTotal, DailyTotal, Summary, DEFAULT_LABEL_MAX_CHARS, UNKNOWN_CATEGORY,
};
pub use value::{CellValue, RawRow};
