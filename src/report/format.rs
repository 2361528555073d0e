//! Display formatting for summary metrics

use crate::calculator::MetricValue;

/// Whole rupees with thousands separators, e.g. `₹1,234,567`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{}", group_thousands(rounded.abs() as u64))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_metric(value: &MetricValue) -> String {
    match value {
        MetricValue::Currency(amount) => format_currency(*amount),
        MetricValue::Percent(pct) => format!("{pct:.2}%"),
        MetricValue::Multiplier(x) => format!("{x:.2}x"),
        MetricValue::Years(years) => format!("{years} years"),
        MetricValue::Milestone(Some(m)) => format!("Year {}, Month {}", m.year, m.month),
        MetricValue::Milestone(None) => "Not reached".to_string(),
    }
}
