//! Amount parsing and cent rounding.

/// Parse a money-looking string into a finite number.
///
/// Accepts `$` signs, thousands separators and accounting-style negatives
/// like `(12.50)`. Returns `None` for anything else, including NaN and infinity.
pub fn parse_amount_text(raw: &str) -> Option<f64> {
    let s = raw.trim().replace(['$', ','], "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let value = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => -inner.trim().parse::<f64>().ok()?,
        None => s.parse::<f64>().ok()?,
    };

    value.is_finite().then_some(value)
}

/// Ulps of slack allowed below a half-cent before it stops counting as one.
const HALF_CENT_SLACK_ULPS: f64 = 64.0;

/// Round half-up to two decimals.
///
/// Sums like `10.005 + 5` land a few ulps below the half-cent in binary. The
/// tolerance covers that representation error and nothing more, so it stays
/// far below a hundredth of a cent even for totals in the billions.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scaled = value * 100.0;
    let tolerance = (scaled.abs() * f64::EPSILON * HALF_CENT_SLACK_ULPS).max(1e-9);
    let rounded = (scaled + 0.5 + tolerance).floor() / 100.0;
    // normalize -0.0
    rounded + 0.0
}
