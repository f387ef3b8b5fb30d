use crate::{
    difficulty::preprocess::ProcessedChart,
    util::{
        corner_range,
        smoothing::{smooth_on_corners, SmoothMode},
    },
};

/// Delta assigned to corners no note pair covers; large enough that its
/// inverse-delta weight vanishes.
pub const UNSET_DELTA: f64 = 1e9;

const JACK_LENIENCY_SCALE: f64 = 0.11;
const NERF_STRENGTH: f64 = 7e-5;
const NERF_CENTER: f64 = 0.08;
const NERF_SPREAD: f64 = 0.15;

const SMOOTH_WINDOW: i64 = 500;
const SMOOTH_SCALE: f64 = 0.001;

/// Single-finger repeated-press stress.
///
/// Each column is an independent step function over its consecutive note
/// pairs; after smoothing, columns are combined per corner through an
/// inverse-delta-weighted 5th-power mean so the currently hardest column
/// dominates.
pub fn evaluate(chart: &ProcessedChart, base_corners: &[i64]) -> Vec<f64> {
    let x = chart.hit_leniency;
    let deltas = column_deltas(chart, base_corners);

    let smoothed: Vec<Vec<f64>> = (0..chart.column_count)
        .map(|k| {
            let mut curve = vec![0.0; base_corners.len()];

            for pair in chart.columns[k].windows(2) {
                let delta = (pair[1].head - pair[0].head) as f64 / 1000.0;
                let val = jack_value(delta, x) * jack_nerfer(delta);

                let (start, end) = corner_range(base_corners, pair[0].head, pair[1].head);
                curve[start..end].fill(val);
            }

            smooth_on_corners(base_corners, &curve, SMOOTH_WINDOW, SMOOTH_SCALE, SmoothMode::Sum)
        })
        .collect();

    (0..base_corners.len())
        .map(|i| {
            let mut num = 0.0;
            let mut den = 0.0;

            for k in 0..chart.column_count {
                let weight = deltas[k][i].recip();

                num += smoothed[k][i].max(0.0).powi(5) * weight;
                den += weight;
            }

            (num / den.max(f64::MIN_POSITIVE)).powf(0.2)
        })
        .collect()
}

/// Per-column raw head-to-head deltas (seconds) as a step function on the
/// given grid. Also used by the imbalance curve on the wider grid.
pub fn column_deltas(chart: &ProcessedChart, corners: &[i64]) -> Vec<Vec<f64>> {
    (0..chart.column_count)
        .map(|k| {
            let mut deltas = vec![UNSET_DELTA; corners.len()];

            for pair in chart.columns[k].windows(2) {
                let delta = (pair[1].head - pair[0].head) as f64 / 1000.0;

                let (start, end) = corner_range(corners, pair[0].head, pair[1].head);
                deltas[start..end].fill(delta);
            }

            deltas
        })
        .collect()
}

fn jack_value(delta: f64, x: f64) -> f64 {
    delta.recip() * (delta + JACK_LENIENCY_SCALE * x.powf(0.25)).recip()
}

/// Suppresses near-resonance deltas around 80ms.
fn jack_nerfer(delta: f64) -> f64 {
    1.0 - NERF_STRENGTH * (NERF_SPREAD + (delta - NERF_CENTER).abs()).powi(-4)
}
