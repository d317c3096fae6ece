//! Descriptive statistics over a [`FilteredView`].
//!
//! Null cells are skipped everywhere: a sum over no values is `0.0`, a mean
//! over no values is `None`. Grouping keeps the first-appearance order of the
//! key in the view and skips records whose key is null.

use std::collections::HashMap;

use crate::data::{CategoryColumn, NumericColumn, Record};
use crate::filter::FilteredView;
use crate::query::result::{Bin, BoxSummary, CorrelationMatrix, Series};

/// Records sharing one value of a categorical column.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub key: &'a str,
    pub records: Vec<&'a Record>,
}

impl<'a> Group<'a> {
    pub fn view(&self) -> FilteredView<'a> {
        FilteredView::from_records(self.records.clone())
    }
}

/// Non-null values of a column, in view order.
pub fn values(view: &FilteredView<'_>, column: NumericColumn) -> Vec<f64> {
    view.iter().filter_map(|r| column.value(r)).collect()
}

/// Sum of the non-null values; `0.0` (never `-0.0`) when there are none.
pub fn sum(view: &FilteredView<'_>, column: NumericColumn) -> f64 {
    view.iter()
        .filter_map(|r| column.value(r))
        .fold(0.0, |acc, v| acc + v)
}

pub fn mean(view: &FilteredView<'_>, column: NumericColumn) -> Option<f64> {
    mean_of(&values(view, column))
}

pub fn mean_of(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        None
    } else {
        Some(sample.iter().fold(0.0, |acc, v| acc + v) / sample.len() as f64)
    }
}

pub fn min_of(sample: &[f64]) -> Option<f64> {
    sample.iter().copied().reduce(f64::min)
}

pub fn max_of(sample: &[f64]) -> Option<f64> {
    sample.iter().copied().reduce(f64::max)
}

/// Number of records whose column equals `value` exactly.
pub fn count_eq(view: &FilteredView<'_>, column: CategoryColumn, value: &str) -> usize {
    view.iter().filter(|r| column.value(r) == Some(value)).count()
}

/// Share of rows with a passing inspection, as a percentage.
///
/// Every row counts toward the denominator, including null results. An empty
/// view has a pass rate of `0.0`.
pub fn pass_rate(view: &FilteredView<'_>) -> f64 {
    if view.is_empty() {
        return 0.0;
    }
    let passed = count_eq(view, CategoryColumn::InspectionResults, crate::data::INSPECTION_PASS);
    passed as f64 / view.len() as f64 * 100.0
}

/// Partition the view by a categorical column.
pub fn group_by<'a>(view: &FilteredView<'a>, key: CategoryColumn) -> Vec<Group<'a>> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for record in view.iter() {
        let Some(k) = key.value(record) else {
            continue;
        };
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(Group {
                key: k,
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups
}

pub fn group_sum(view: &FilteredView<'_>, key: CategoryColumn, column: NumericColumn) -> Series {
    let mut series = Series::default();
    for group in group_by(view, key) {
        series.push(group.key, sum(&group.view(), column));
    }
    series
}

/// Per-group mean. Groups with no non-null values are left out.
pub fn group_mean(view: &FilteredView<'_>, key: CategoryColumn, column: NumericColumn) -> Series {
    let mut series = Series::default();
    for group in group_by(view, key) {
        if let Some(m) = mean(&group.view(), column) {
            series.push(group.key, m);
        }
    }
    series
}

/// Occurrences of each value, most frequent first; ties keep first appearance.
pub fn value_counts(view: &FilteredView<'_>, column: CategoryColumn) -> Series {
    let mut counts: Vec<(&str, usize)> = group_by(view, column)
        .into_iter()
        .map(|g| (g.key, g.records.len()))
        .collect();
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut series = Series::default();
    for (label, count) in counts {
        series.push(label, count as f64);
    }
    series
}

/// Equal-width bins spanning `[min, max]` of the sample.
///
/// A constant sample produces one bin holding every value; an empty sample
/// produces no bins.
pub fn histogram(sample: &[f64], bin_count: usize) -> Vec<Bin> {
    let (Some(lo), Some(hi)) = (min_of(sample), max_of(sample)) else {
        return Vec::new();
    };
    if bin_count == 0 {
        return Vec::new();
    }
    if lo == hi {
        return vec![Bin {
            start: lo,
            end: hi,
            count: sample.len(),
        }];
    }

    let width = (hi - lo) / bin_count as f64;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bin_count {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in sample {
        let slot = (((v - lo) / width).floor() as usize).min(bin_count - 1);
        bins[slot].count += 1;
    }
    bins
}

/// Quantile of a sorted sample by linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Box-plot summary of a sample, `None` when the sample is empty.
pub fn box_summary(sample: &[f64]) -> Option<BoxSummary> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .partition(|&&v| v >= low_fence && v <= high_fence);

    Some(BoxSummary {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker: min_of(&inside).unwrap_or(q1),
        upper_whisker: max_of(&inside).unwrap_or(q3),
        outliers,
    })
}

/// Pearson correlation of paired samples.
///
/// `None` with fewer than two pairs or when either side has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise-complete correlation matrix over the given columns.
pub fn correlation_matrix(view: &FilteredView<'_>, columns: &[NumericColumn]) -> CorrelationMatrix {
    let n = columns.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = view
                .iter()
                .filter_map(|r| Some((columns[i].value(r)?, columns[j].value(r)?)))
                .collect();
            let r = pearson(&pairs);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        labels: columns.iter().map(|c| c.header().to_string()).collect(),
        values,
    }
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
