use crate::{
    difficulty::{activity::key_usage, preprocess::ProcessedChart},
    util::smoothing::{smooth_on_corners, SmoothMode},
};

use super::jack::column_deltas;

const DISAGREEMENT_SLACK: f64 = 0.4;
const DISAGREEMENT_FLOOR: f64 = 0.11;
const MILD_THRESHOLD: f64 = 0.02;
const STEEP_THRESHOLD: f64 = 0.07;

const SMOOTH_WINDOW: i64 = 250;

/// Hand-balance penalty on the wide (±1000ms) corner grid.
///
/// Columns drumming in lockstep (tiny delta disagreement) are easier than
/// their raw jack values suggest; the running per-corner factor dampens
/// them. Plainly disagreeing columns leave the factor at 1.
pub fn evaluate(chart: &ProcessedChart, a_corners: &[i64]) -> Vec<f64> {
    let usage = key_usage(chart, a_corners);
    let deltas = column_deltas(chart, a_corners);

    let curve: Vec<f64> = (0..a_corners.len())
        .map(|i| {
            let mut factor = 1.0;

            let active: Vec<usize> = (0..chart.column_count).filter(|&k| usage[k][i]).collect();

            for pair in active.windows(2) {
                let d0 = deltas[pair[0]][i];
                let d1 = deltas[pair[1]][i];
                let max_delta = d0.max(d1);

                let disagreement = (d0 - d1).abs()
                    + DISAGREEMENT_SLACK * (max_delta - DISAGREEMENT_FLOOR).max(0.0);

                if disagreement < MILD_THRESHOLD {
                    factor *= (0.75 + 0.5 * max_delta).min(1.0);
                } else if disagreement < STEEP_THRESHOLD {
                    factor *= (0.65 + 5.0 * disagreement + 0.5 * max_delta).min(1.0);
                }
            }

            factor
        })
        .collect();

    smooth_on_corners(a_corners, &curve, SMOOTH_WINDOW, 0.0, SmoothMode::Average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::corners::CornerGrids,
        model::chart::{Chart, Note},
    };

    fn abar(notes: Vec<Note>) -> Vec<f64> {
        let chart = Chart::new(notes, 4).unwrap();
        let processed = ProcessedChart::new(&chart, 8.0, 1.0);
        let grids = CornerGrids::new(&processed);

        evaluate(&processed, &grids.a)
    }

    #[test]
    fn single_column_is_never_dampened() {
        let curve = abar((0..8).map(|i| Note::tap(0, i * 200)).collect());

        for value in curve {
            assert!((value - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn lockstep_adjacent_columns_are_dampened() {
        // Columns 1 and 2 hammer identical 100ms jacks: zero delta
        // disagreement, so the mild clamp kicks in.
        let notes = (0..20)
            .flat_map(|i| [Note::tap(1, i * 100), Note::tap(2, i * 100)])
            .collect();

        let curve = abar(notes);
        let min = curve.iter().copied().fold(f64::INFINITY, f64::min);

        assert!(min < 1.0);
        assert!(min >= 0.75 - 1e-9);
    }
}
