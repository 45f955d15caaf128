//! Min-max normalization of raw weigher scores.

/// Rescale `scores` into `[0, 1]`.
///
/// `min` and `max` override the bounds derived from the data. When the
/// bounds are equal (all scores identical, or a single score) every
/// output is `0.0`: there is nothing to discriminate on.
pub fn normalize(scores: &[f64], min: Option<f64>, max: Option<f64>) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = min.unwrap_or_else(|| scores.iter().copied().fold(f64::INFINITY, f64::min));
    let max = max.unwrap_or_else(|| scores.iter().copied().fold(f64::NEG_INFINITY, f64::max));

    if min == max {
        return vec![0.0; scores.len()];
    }

    let range = max - min;
    scores.iter().map(|s| (s - min) / range).collect()
}
