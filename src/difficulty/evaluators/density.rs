use crate::difficulty::preprocess::ProcessedChart;

/// Half-width of the density counting window.
const DENSITY_WINDOW: i64 = 500;

/// Note density `C`: the amount of note heads within ±500ms of each
/// corner, via binary search over the sorted head times. A plain step
/// function, no smoothing.
pub fn note_density(chart: &ProcessedChart, corners: &[i64]) -> Vec<f64> {
    let heads: Vec<i64> = chart.notes.iter().map(|note| note.head).collect();

    corners
        .iter()
        .map(|&s| {
            let start = heads.partition_point(|&h| h < s - DENSITY_WINDOW);
            let end = heads.partition_point(|&h| h < s + DENSITY_WINDOW);

            (end - start) as f64
        })
        .collect()
}

/// Active key count `Ks`: how many columns are in use at each corner, at
/// least 1 so it can sit in an exponent denominator.
pub fn active_keys(active_columns: &[Vec<u8>]) -> Vec<f64> {
    active_columns
        .iter()
        .map(|columns| columns.len().max(1) as f64)
        .collect()
}
