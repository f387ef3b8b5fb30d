use crate::util::corner_range;

use super::preprocess::ProcessedChart;

/// Dwell window of the boolean column usage, per side.
const USAGE_WINDOW: i64 = 150;
/// Falloff span of the weighted column usage, per side.
const USAGE_400_WINDOW: i64 = 400;
/// Base weight of a pressed column.
const USAGE_400_BASE: f64 = 3.75;

const ANCHOR_SHIFT_LINEAR: f64 = 0.18;
const ANCHOR_SHIFT_CUBIC: f64 = 0.22;

/// Which columns are busy at each base corner, and how unevenly the load
/// is spread across them.
pub struct Activity {
    /// Boolean usage per column, aligned with the base corners.
    pub usage: Vec<Vec<bool>>,
    /// The sorted list of active columns at each base corner.
    pub active_columns: Vec<Vec<u8>>,
    /// The hand-balance anchor coefficient at each base corner; consumed
    /// only by the press curve.
    pub anchor: Vec<f64>,
}

impl Activity {
    pub fn new(chart: &ProcessedChart, base_corners: &[i64]) -> Self {
        let usage = key_usage(chart, base_corners);
        let active_columns = active_columns(&usage, base_corners.len());
        let usage_400 = key_usage_400(chart, base_corners);
        let anchor = anchor_coefficient(&usage_400, base_corners.len());

        Self {
            usage,
            active_columns,
            anchor,
        }
    }
}

/// Mark every corner within `[head - 150, tail + 150)` as "column in use".
pub fn key_usage(chart: &ProcessedChart, corners: &[i64]) -> Vec<Vec<bool>> {
    let mut usage = vec![vec![false; corners.len()]; chart.column_count];

    for note in chart.notes.iter() {
        let (start, end) = corner_range(corners, note.head - USAGE_WINDOW, note.tail + USAGE_WINDOW);

        for slot in &mut usage[usize::from(note.column)][start..end] {
            *slot = true;
        }
    }

    usage
}

fn active_columns(usage: &[Vec<bool>], n_corners: usize) -> Vec<Vec<u8>> {
    (0..n_corners)
        .map(|i| {
            (0..usage.len())
                .filter(|&k| usage[k][i])
                .map(|k| k as u8)
                .collect()
        })
        .collect()
}

/// Weighted column usage: full weight while the note is held, parabolic
/// falloff to zero over a further 400ms on each side.
fn key_usage_400(chart: &ProcessedChart, corners: &[i64]) -> Vec<Vec<f64>> {
    let mut usage = vec![vec![0.0; corners.len()]; chart.column_count];

    for note in chart.notes.iter() {
        let weight = USAGE_400_BASE + (note.hold_duration().min(1500) as f64) / 150.0;
        let (start, end) = corner_range(
            corners,
            note.head - USAGE_400_WINDOW,
            note.tail + USAGE_400_WINDOW + 1,
        );

        let column = &mut usage[usize::from(note.column)];

        for i in start..end {
            let s = corners[i];

            let dist = if s < note.head {
                note.head - s
            } else if s > note.tail {
                s - note.tail
            } else {
                0
            };

            let falloff = dist as f64 / USAGE_400_WINDOW as f64;
            column[i] += weight * (1.0 - falloff * falloff).max(0.0);
        }
    }

    usage
}

/// The per-corner anchor coefficient.
///
/// Ranks the nonzero weighted usages descending and walks consecutive rank
/// pairs; a balanced pair (ratio near 0.5) contributes fully, a lopsided
/// one barely at all. A single active column yields 0 before the remap.
fn anchor_coefficient(usage_400: &[Vec<f64>], n_corners: usize) -> Vec<f64> {
    let mut anchor = vec![0.0; n_corners];
    let mut counts = Vec::with_capacity(usage_400.len());

    for (i, value) in anchor.iter_mut().enumerate() {
        counts.clear();
        counts.extend(
            usage_400
                .iter()
                .map(|column| column[i])
                .filter(|&weight| weight > 0.0),
        );
        counts.sort_unstable_by(|a, b| b.total_cmp(a));

        if counts.len() < 2 {
            continue;
        }

        let mut walk = 0.0;
        let mut max_walk = 0.0;

        for pair in counts.windows(2) {
            let ratio = pair[1] / pair[0];
            let balance = 0.5 - ratio;

            walk += pair[0] * (1.0 - 4.0 * balance * balance);
            max_walk += pair[0];
        }

        *value = walk / max_walk;
    }

    for value in &mut anchor {
        let shifted_linear = *value - ANCHOR_SHIFT_LINEAR;
        let shifted_cubic = *value - ANCHOR_SHIFT_CUBIC;

        *value = 1.0 + shifted_linear.min(5.0 * shifted_cubic.powi(3));
    }

    anchor
}
