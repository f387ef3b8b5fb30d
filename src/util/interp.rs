//! Grid-to-grid resampling of corner-aligned curves.

/// Linearly interpolate a curve from one corner grid onto another.
///
/// Queries outside the source grid clamp to the first/last value. Both
/// grids must be strictly increasing.
pub fn lerp_on_corners(target: &[i64], corners: &[i64], values: &[f64]) -> Vec<f64> {
    target
        .iter()
        .map(|&s| {
            let i = corners.partition_point(|&c| c < s);

            if i == 0 {
                values[0]
            } else if i == corners.len() {
                values[values.len() - 1]
            } else {
                let x0 = corners[i - 1] as f64;
                let x1 = corners[i] as f64;
                let t = (s as f64 - x0) / (x1 - x0);

                values[i - 1] + t * (values[i] - values[i - 1])
            }
        })
        .collect()
}

/// Resample a step function onto another grid, taking the nearest
/// preceding value.
pub fn step_on_corners(target: &[i64], corners: &[i64], values: &[f64]) -> Vec<f64> {
    target
        .iter()
        .map(|&s| {
            let i = corners.partition_point(|&c| c <= s);
            let i = i.saturating_sub(1).min(values.len() - 1);

            values[i]
        })
        .collect()
}
