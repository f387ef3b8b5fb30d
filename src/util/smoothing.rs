//! Sliding-window integration of stepped curves on a corner grid.
//!
//! Every component curve is piecewise constant between corners, so the
//! integral over any window reduces to a prefix-sum lookup plus a partial
//! segment on each end.

/// How a window integral is turned into a corner value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SmoothMode {
    /// The integral itself, multiplied by a small scale.
    Sum,
    /// The integral divided by the window length.
    Average,
}

/// Smooth a stepped curve over a `±window` milliseconds interval around
/// every corner.
///
/// `values[i]` is the curve value on `[corners[i], corners[i + 1])`. The
/// window is clipped to the grid, so corners near the edges integrate over
/// less time. In [`SmoothMode::Sum`] the integral is multiplied by `scale`
/// (i.e. `0.001` converts a per-second value integrated over milliseconds
/// back into dimensionless stress).
pub fn smooth_on_corners(
    corners: &[i64],
    values: &[f64],
    window: i64,
    scale: f64,
    mode: SmoothMode,
) -> Vec<f64> {
    let prefix = cumulative_sum(corners, values);
    let mut smoothed = vec![0.0; corners.len()];

    let Some((&first, &last)) = corners.first().zip(corners.last()) else {
        return smoothed;
    };

    for (i, &s) in corners.iter().enumerate() {
        let a = (s - window).max(first);
        let b = (s + window).min(last);

        let integral = query(b, corners, &prefix, values) - query(a, corners, &prefix, values);

        smoothed[i] = match mode {
            SmoothMode::Sum => scale * integral,
            SmoothMode::Average if b > a => integral / (b - a) as f64,
            SmoothMode::Average => 0.0,
        };
    }

    smoothed
}

/// `prefix[i]` = integral of the stepped curve over `[corners[0], corners[i]]`.
fn cumulative_sum(corners: &[i64], values: &[f64]) -> Vec<f64> {
    let mut prefix = vec![0.0; corners.len()];

    for i in 1..corners.len() {
        let dx = (corners[i] - corners[i - 1]) as f64;
        prefix[i] = prefix[i - 1] + values[i - 1] * dx;
    }

    prefix
}

/// Integral of the stepped curve from the first corner up to `q`.
fn query(q: i64, corners: &[i64], prefix: &[f64], values: &[f64]) -> f64 {
    let Some((&first, &last)) = corners.first().zip(corners.last()) else {
        return 0.0;
    };

    if q <= first {
        return 0.0;
    } else if q >= last {
        return prefix[prefix.len() - 1];
    }

    let i = corners.partition_point(|&s| s < q) - 1;

    prefix[i] + values[i] * (q - corners[i]) as f64
}
