//! Numeric helpers shared by the normalizer.
//!
//! Columns are `&[Option<f64>]`: `None` is an absent observation, while a
//! present non-finite value is a bad observation. Both are skipped when
//! computing moments.

/// Reason a column cannot be rebased to its first observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineError {
    Missing,
    Zero,
    /// The baseline is so close to zero that rebased values leave `f64`.
    Overflow,
}

/// Finite values of a column, in order.
pub fn finite_values(column: &[Option<f64>]) -> Vec<f64> {
    column
        .iter()
        .filter_map(|value| value.filter(|v| v.is_finite()))
        .collect()
}

/// Running mean; the partial sums never leave the range of the inputs.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut mean = 0.0;
    for (count, value) in values.iter().enumerate() {
        let n = (count + 1) as f64;
        mean += value / n - mean / n;
    }
    Some(mean)
}

/// Population standard deviation (divides by `n`).
///
/// Deviations are scaled by the largest one before squaring.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let scale = values
        .iter()
        .map(|value| (value - mean).abs())
        .fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }

    let variance = values
        .iter()
        .map(|value| ((value - mean) / scale).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    scale * variance.sqrt()
}

/// Maps each value to `(v - mean) / std`.
///
/// A zero spread is treated as `1`. Present non-finite values map to `0`;
/// absent values stay absent. Scores are scale-free, so the column is first
/// divided by its largest magnitude to keep the moments finite.
pub fn z_scores(column: &[Option<f64>]) -> Vec<Option<f64>> {
    let finite = finite_values(column);
    let magnitude = finite.iter().map(|v| v.abs()).fold(0.0, f64::max);
    let scale = if magnitude == 0.0 { 1.0 } else { magnitude };

    let scaled: Vec<f64> = finite.iter().map(|v| v / scale).collect();
    let Some(mean) = mean(&scaled) else {
        return column.iter().map(|value| value.map(|_| 0.0)).collect();
    };

    let std = population_std_dev(&scaled, mean);
    let std = if std == 0.0 || !std.is_finite() { 1.0 } else { std };

    column
        .iter()
        .map(|value| {
            value.map(|v| {
                if !v.is_finite() {
                    return 0.0;
                }
                let score = (v / scale - mean) / std;
                if score.is_finite() {
                    score
                } else {
                    0.0
                }
            })
        })
        .collect()
}

/// Rebases a column to percentage change from its first finite value.
pub fn percent_from_start(column: &[Option<f64>]) -> Result<Vec<Option<f64>>, BaselineError> {
    let baseline = column
        .iter()
        .find_map(|value| value.filter(|v| v.is_finite()))
        .ok_or(BaselineError::Missing)?;

    if baseline == 0.0 {
        return Err(BaselineError::Zero);
    }

    column
        .iter()
        .map(|value| match value.filter(|v| v.is_finite()) {
            None => Ok(None),
            Some(v) => {
                let rebased = (v / baseline - 1.0) * 100.0;
                if rebased.is_finite() {
                    Ok(Some(rebased))
                } else {
                    Err(BaselineError::Overflow)
                }
            }
        })
        .collect()
}
