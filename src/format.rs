//! Display formatting for metric values.

use serde::Serialize;

/// Placeholder for an undefined metric (mean over no rows).
pub const UNDEFINED: &str = "N/A";

/// How a scalar metric is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFormat {
    /// `$1,234` - thousands separators, no decimals.
    Currency0,
    /// `$12.35`
    Currency2,
    /// `1,234`
    Count,
    /// `12` - rounded, no separators.
    Whole,
    /// `12.3 days`
    Days1,
    /// `50.0%`
    Percent1,
    /// `2.35%`
    Percent2,
}

impl MetricFormat {
    pub fn format(self, value: Option<f64>) -> String {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return UNDEFINED.to_string();
        };
        let v = zero_unless_visible(v, self.decimals());
        match self {
            MetricFormat::Currency0 => with_sign(v.round(), |a| format!("${}", group_thousands(a, 0))),
            MetricFormat::Currency2 => with_sign(v, |a| format!("${a:.2}")),
            MetricFormat::Count => with_sign(v.round(), |a| group_thousands(a, 0)),
            MetricFormat::Whole => format!("{:.0}", v.round()),
            MetricFormat::Days1 => format!("{v:.1} days"),
            MetricFormat::Percent1 => format!("{v:.1}%"),
            MetricFormat::Percent2 => format!("{v:.2}%"),
        }
    }

    fn decimals(self) -> i32 {
        match self {
            MetricFormat::Currency0 | MetricFormat::Count | MetricFormat::Whole => 0,
            MetricFormat::Days1 | MetricFormat::Percent1 => 1,
            MetricFormat::Currency2 | MetricFormat::Percent2 => 2,
        }
    }
}

/// Positive zero for any value that shows as zero at `decimals` places, so
/// `-0.0` and tiny negatives never print as `-0`.
pub fn zero_unless_visible(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    if (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    }
}

fn with_sign(value: f64, body: impl Fn(f64) -> String) -> String {
    if value < 0.0 {
        format!("-{}", body(-value))
    } else {
        body(value)
    }
}

/// Format a non-negative number with `,` thousands separators.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let value = zero_unless_visible(value, decimals as i32);
    let text = format!("{value:.decimals$}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}
