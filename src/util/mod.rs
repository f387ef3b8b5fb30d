pub mod interp;
pub mod smoothing;

/// Half-open index range `[start, end)` of the corners contained in the
/// time window `[from, to)`.
pub fn corner_range(corners: &[i64], from: i64, to: i64) -> (usize, usize) {
    let start = corners.partition_point(|&s| s < from);
    let end = corners.partition_point(|&s| s < to);

    (start, end)
}
