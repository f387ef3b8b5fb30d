use crate::{
    difficulty::preprocess::ProcessedChart,
    util::{
        corner_range,
        smoothing::{smooth_on_corners, SmoothMode},
    },
};

/// Per-key-count cross-influence coefficients, one entry per column-pair
/// boundary (K + 1 per row), symmetric around the middle columns. Row `K`
/// serves charts with `K` columns; these values are empirically tuned, do
/// not touch them.
const CROSS_MATRIX: [&[f64]; 11] = [
    &[],
    &[0.075, 0.075],
    &[0.125, 0.05, 0.125],
    &[0.125, 0.125, 0.125, 0.125],
    &[0.175, 0.25, 0.05, 0.25, 0.175],
    &[0.175, 0.25, 0.175, 0.175, 0.25, 0.175],
    &[0.225, 0.35, 0.25, 0.05, 0.25, 0.35, 0.225],
    &[0.225, 0.35, 0.25, 0.225, 0.225, 0.25, 0.35, 0.225],
    &[0.275, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.275],
    &[0.275, 0.45, 0.35, 0.25, 0.275, 0.275, 0.25, 0.35, 0.45, 0.275],
    &[0.325, 0.55, 0.45, 0.35, 0.25, 0.05, 0.25, 0.35, 0.45, 0.55, 0.325],
];

const BASE_STRENGTH: f64 = 0.16;
const FAST_CROSS_STRENGTH: f64 = 0.4;
const FAST_CROSS_FLOOR: f64 = 0.06;
const FAST_CROSS_OFFSET: f64 = 80.0;

const SMOOTH_WINDOW: i64 = 500;
const SMOOTH_SCALE: f64 = 0.001;

/// Inter-column interference.
///
/// For every boundary between adjacent columns (including the outer
/// edges), the merged note stream straddling it contributes stress that
/// only fully counts while the columns next to the boundary are contested.
pub fn evaluate(chart: &ProcessedChart, base_corners: &[i64], usage: &[Vec<bool>]) -> Vec<f64> {
    let k_cols = chart.column_count;
    let x = chart.hit_leniency;
    let coeff = CROSS_MATRIX[k_cols];

    let mut cross = vec![vec![0.0; base_corners.len()]; k_cols + 1];
    let mut fast_cross = vec![vec![0.0; base_corners.len()]; k_cols + 1];

    for k in 0..=k_cols {
        let heads = boundary_heads(chart, k);

        for pair in heads.windows(2) {
            let delta = (pair[1] - pair[0]) as f64 / 1000.0;
            let val = BASE_STRENGTH / x.max(delta).powi(2);

            let fast = FAST_CROSS_STRENGTH / delta.max(FAST_CROSS_FLOOR.max(0.75 * x)).powi(2)
                - FAST_CROSS_OFFSET;
            let fast = fast.max(0.0);

            let (start, end) = corner_range(base_corners, pair[0], pair[1]);

            for i in start..end {
                let left_active = k > 0 && usage[k - 1][i];
                let right_active = k < k_cols && usage[k][i];

                // An idle boundary only contributes a reduced share.
                cross[k][i] = if left_active || right_active {
                    val
                } else {
                    val * (1.0 - coeff[k])
                };

                fast_cross[k][i] = fast;
            }
        }
    }

    let combined: Vec<f64> = (0..base_corners.len())
        .map(|i| {
            let direct: f64 = (0..=k_cols).map(|k| cross[k][i] * coeff[k]).sum();

            let fast: f64 = (0..k_cols)
                .map(|k| {
                    (fast_cross[k][i] * coeff[k] * fast_cross[k + 1][i] * coeff[k + 1]).sqrt()
                })
                .sum();

            direct + fast
        })
        .collect();

    smooth_on_corners(
        base_corners,
        &combined,
        SMOOTH_WINDOW,
        SMOOTH_SCALE,
        SmoothMode::Sum,
    )
}

/// Head times of the merged note streams of the columns adjacent to
/// boundary `k`; only one column exists at the outer edges.
fn boundary_heads(chart: &ProcessedChart, k: usize) -> Vec<i64> {
    let left = k
        .checked_sub(1)
        .map(|k| chart.columns[k].as_slice())
        .unwrap_or_default();
    let right = if k < chart.column_count {
        chart.columns[k].as_slice()
    } else {
        &[]
    };

    let mut heads: Vec<i64> = left
        .iter()
        .chain(right.iter())
        .map(|note| note.head)
        .collect();
    heads.sort_unstable();

    heads
}
