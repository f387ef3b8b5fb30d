use crate::{
    difficulty::preprocess::ProcessedChart,
    util::{
        corner_range,
        smoothing::{smooth_on_corners, SmoothMode},
    },
};

/// Sentinel head for "no further note in this column".
const FAR_FUTURE: i64 = 1_000_000_000;

const RELEASE_STRENGTH: f64 = 0.08;
const INDEX_OFFSET_MS: f64 = 80.0;
const INDEX_WEIGHT: f64 = 0.8;

const SMOOTH_WINDOW: i64 = 500;
const SMOOTH_SCALE: f64 = 0.001;

/// Hold-release stress.
///
/// Each hold gets an awkwardness index from how close its own duration and
/// the gap to the next same-column note land to the 80ms offset, squashed
/// through a logistic-like curve; consecutive release times then spread a
/// `delta^-0.5` stress between them. All-zero for hold-free charts.
pub fn evaluate(chart: &ProcessedChart, base_corners: &[i64]) -> Vec<f64> {
    let x = chart.hit_leniency;
    let mut curve = vec![0.0; base_corners.len()];

    let indices: Vec<f64> = chart
        .tail_seq
        .iter()
        .map(|hold| {
            let column = &chart.columns[usize::from(hold.column)];
            let next_head = column
                .iter()
                .find(|note| note.head > hold.head)
                .map_or(FAR_FUTURE, |note| note.head);

            let head_closeness = ((hold.tail - hold.head) as f64 - INDEX_OFFSET_MS).abs() / (1000.0 * x);
            let tail_closeness = ((next_head - hold.tail) as f64 - INDEX_OFFSET_MS).abs() / (1000.0 * x);

            2.0 / (2.0
                + (-5.0 * (head_closeness - 0.75)).exp()
                + (-5.0 * (tail_closeness - 0.75)).exp())
        })
        .collect();

    for (i, pair) in chart.tail_seq.windows(2).enumerate() {
        let (start, end) = corner_range(base_corners, pair[0].tail, pair[1].tail);

        // Equal tails cover no corners; skip before the delta diverges.
        if start == end {
            continue;
        }

        let delta = (pair[1].tail - pair[0].tail) as f64 / 1000.0;
        let val = RELEASE_STRENGTH / delta.sqrt() / x
            * (1.0 + INDEX_WEIGHT * (indices[i] + indices[i + 1]));

        curve[start..end].fill(val);
    }

    smooth_on_corners(
        base_corners,
        &curve,
        SMOOTH_WINDOW,
        SMOOTH_SCALE,
        SmoothMode::Sum,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::corners::CornerGrids,
        model::chart::{Chart, Note},
    };

    fn rbar(notes: Vec<Note>) -> Vec<f64> {
        let chart = Chart::new(notes, 4).unwrap();
        let processed = ProcessedChart::new(&chart, 8.0, 1.0);
        let grids = CornerGrids::new(&processed);

        evaluate(&processed, &grids.base)
    }

    #[test]
    fn hold_free_chart_has_zero_release() {
        let curve = rbar((0..12).map(|i| Note::tap((i % 4) as u8, i * 120)).collect());

        assert!(curve.iter().all(|&value| value == 0.0));
    }

    #[test]
    fn staggered_releases_create_stress() {
        let notes = (0..6)
            .map(|i| Note::hold((i % 4) as u8, i * 300, i * 300 + 450))
            .collect();

        let curve = rbar(notes);

        assert!(curve.iter().copied().fold(0.0_f64, f64::max) > 0.0);
    }

    #[test]
    fn simultaneous_releases_do_not_diverge() {
        let notes = vec![
            Note::hold(0, 0, 600),
            Note::hold(1, 100, 600),
            Note::hold(2, 200, 900),
        ];

        let curve = rbar(notes);

        assert!(curve.iter().all(|value| value.is_finite()));
    }
}
