pub mod models;

use self::models::{Bin, HistogramResult, LabelPolicy};

///
/// Splits `[min, max]` of `series` into `bin_count` equal-width bins and
/// counts the samples in each. A series whose samples are all equal
/// yields a single bin `[v, v]` holding every sample, whatever
/// `bin_count` is. An empty series yields no bins.
///
pub fn histogram(series: &[f64], bin_count: usize, policy: LabelPolicy) -> HistogramResult {
    equal_width_bins(series, bin_count, policy).into()
}

pub fn equal_width_bins(series: &[f64], bin_count: usize, policy: LabelPolicy) -> Vec<Bin> {
    let Some((min, max)) = range(series) else {
        return Vec::new();
    };

    if min == max {
        return vec![Bin {
            lower: min,
            upper: max,
            representative: policy.apply(min),
            weight: series.len() as f64,
        }];
    }

    let bin_count = bin_count.max(1);
    let width = (max - min) / bin_count as f64;
    bin_counts(series, bin_count, min, max)
        .into_iter()
        .enumerate()
        .map(|(i, weight)| {
            let lower = min + i as f64 * width;
            // Pin the last edge to max so rounding cannot leave a gap
            let upper = if i + 1 == bin_count { max } else { min + (i + 1) as f64 * width };
            Bin {
                lower,
                upper,
                representative: policy.apply((upper - lower) / 2.0 + lower),
                weight,
            }
        })
        .collect()
}

///
/// Counts `series` into `bin_count` equal-width bins over `[lo, hi]`.
/// Values at or above `hi` land in the last bin, values below `lo`
/// in the first.
///
pub fn bin_counts(series: &[f64], bin_count: usize, lo: f64, hi: f64) -> Vec<f64> {
    let bin_count = bin_count.max(1);
    let mut counts = vec![0.0; bin_count];
    let width = (hi - lo) / bin_count as f64;

    for &value in series {
        let idx = if width > 0.0 { ((value - lo) / width).floor() } else { 0.0 };
        // Saturating cast maps negatives to 0
        let idx = (idx as usize).min(bin_count - 1);
        counts[idx] += 1.0;
    }
    counts
}

///
/// Exact-match counting over a fixed outcome domain. `outcomes` are
/// slot indices into `labels`, no bin edges are computed.
///
/// Panics if an outcome indexes past `labels`, so every draw is
/// accounted for in the weights.
///
pub fn discrete<I>(outcomes: I, labels: Vec<f64>) -> HistogramResult
where
    I: IntoIterator<Item = usize>,
{
    let mut weights = vec![0.0; labels.len()];
    for outcome in outcomes {
        assert!(outcome < weights.len(), "outcome {outcome} has no slot among {} labels", weights.len());
        weights[outcome] += 1.0;
    }
    HistogramResult { bins: labels, weights }
}

fn range(series: &[f64]) -> Option<(f64, f64)> {
    let first = *series.first()?;
    Some(series.iter().fold((first, first), |(min, max), &v| (min.min(v), max.max(v))))
}
