use crate::{
    difficulty::{hold_body::HoldBodyMass, preprocess::ProcessedChart},
    util::{
        corner_range,
        smoothing::{smooth_on_corners, SmoothMode},
    },
};

const CHORD_SPIKE_SCALE: f64 = 1000.0;
const HOLD_DENSITY_STRENGTH: f64 = 0.006;
const STREAM_BOOST_STRENGTH: f64 = 1.7e-7;
const CURVE_STRENGTH: f64 = 0.08;
const CURVE_SHARPNESS: f64 = 24.0;

const SMOOTH_WINDOW: i64 = 500;
const SMOOTH_SCALE: f64 = 0.001;

/// Tap/stream stress over the full, all-column note sequence.
///
/// Truly simultaneous notes inject Dirac-like spikes at their shared
/// corner instead of spreading value over an empty interval. Holds
/// sustained underneath the taps raise the stress via the hold-body mass,
/// and the anchor coefficient modulates the final increment.
pub fn evaluate(
    chart: &ProcessedChart,
    base_corners: &[i64],
    anchor: &[f64],
    hold_mass: &HoldBodyMass,
) -> Vec<f64> {
    let x = chart.hit_leniency;
    let mut curve = vec![0.0; base_corners.len()];

    for pair in chart.notes.windows(2) {
        let (h0, h1) = (pair[0].head, pair[1].head);

        if h0 == h1 {
            // Exact coincidence: the whole weight lands on one corner.
            if let Ok(i) = base_corners.binary_search(&h0) {
                curve[i] += CHORD_SPIKE_SCALE * (0.02 * (4.0 / x - 24.0)).powf(0.25);
            }

            continue;
        }

        let delta = (h1 - h0) as f64 / 1000.0;
        let booster = stream_booster(delta);
        let hold_density = 1.0 + HOLD_DENSITY_STRENGTH * hold_mass.sum_between(h0, h1);

        // Frozen at delta = 2x/3 so both branches agree at the boundary.
        let spacing = if delta < 2.0 * x / 3.0 {
            delta - x / 2.0
        } else {
            x / 6.0
        };

        let inc = delta.recip()
            * (CURVE_STRENGTH / x * (1.0 - CURVE_SHARPNESS / x * spacing * spacing)).powf(0.25)
            * booster
            * hold_density;

        let (start, end) = corner_range(base_corners, h0, h1);

        for i in start..end {
            curve[i] += (inc * anchor[i]).min(inc.max(2.0 * inc - 10.0));
        }
    }

    smooth_on_corners(
        base_corners,
        &curve,
        SMOOTH_WINDOW,
        SMOOTH_SCALE,
        SmoothMode::Sum,
    )
}

/// Amplifies deltas in the 160-360 notes-per-second-ish band.
fn stream_booster(delta: f64) -> f64 {
    let val = 7.5 / delta;

    if val > 160.0 && val < 360.0 {
        1.0 + STREAM_BOOST_STRENGTH * (val - 160.0) * (val - 360.0) * (val - 360.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        difficulty::{activity::Activity, corners::CornerGrids},
        model::chart::{Chart, Note},
    };

    fn pbar(notes: Vec<Note>) -> (Vec<i64>, Vec<f64>) {
        let chart = Chart::new(notes, 4).unwrap();
        let processed = ProcessedChart::new(&chart, 8.0, 1.0);
        let grids = CornerGrids::new(&processed);
        let activity = Activity::new(&processed, &grids.base);
        let mass = HoldBodyMass::new(&processed);

        let curve = evaluate(&processed, &grids.base, &activity.anchor, &mass);

        (grids.base, curve)
    }

    #[test]
    fn booster_peaks_inside_the_band() {
        assert_eq!(stream_booster(0.5), 1.0);
        assert!(stream_booster(7.5 / 250.0) > 1.0);
        assert_eq!(stream_booster(0.01), 1.0);
    }

    #[test]
    fn chords_spike_higher_than_a_sparse_stream() {
        let stream: Vec<_> = (0..8).map(|i| Note::tap((i % 4) as u8, i * 400)).collect();
        let chords: Vec<_> = (0..8)
            .flat_map(|i| (0..4).map(move |k| Note::tap(k, i * 400)))
            .collect();

        let peak = |curve: &[f64]| curve.iter().copied().fold(0.0_f64, f64::max);

        let (_, sparse) = pbar(stream);
        let (_, spiked) = pbar(chords);

        assert!(peak(&spiked) > peak(&sparse));
    }

    #[test]
    fn held_notes_under_taps_raise_press_stress() {
        let plain: Vec<_> = (0..10).map(|i| Note::tap((i % 2) as u8, i * 150)).collect();

        let mut held = plain.clone();
        held.push(Note::hold(3, 0, 1350));

        let peak = |curve: &[f64]| curve.iter().copied().fold(0.0_f64, f64::max);

        let (_, without) = pbar(plain);
        let (_, with) = pbar(held);

        assert!(peak(&with) > peak(&without));
    }
}
