use crate::data::MetricValue;
use crate::error::DataResult;

/// Shown in place of an aggregate that has no data.
pub const PLACEHOLDER: &str = "—";

/// Group integer digits in thousands: `1234567` → `1,234,567`.
pub fn thousands(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,234` (rounded to whole dollars).
pub fn usd(v: f64) -> String {
    let s = thousands(v);
    match s.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${s}"),
    }
}

pub fn usd_or_placeholder(v: &DataResult<f64>) -> String {
    v.as_ref().map_or_else(|_| PLACEHOLDER.to_string(), |v| usd(*v))
}

/// Integer part of a year-like value (a median of 2004.5 shows as 2004).
pub fn year_or_placeholder(v: &DataResult<f64>) -> String {
    v.as_ref()
        .map_or_else(|_| PLACEHOLDER.to_string(), |v| format!("{}", v.trunc()))
}

/// Table cell for a metric: grouped digits, or the unknown marker.
pub fn metric_cell(v: MetricValue, grouped: bool) -> String {
    match v {
        MetricValue::Known(x) if grouped => thousands(x),
        other => other.to_string(),
    }
}
