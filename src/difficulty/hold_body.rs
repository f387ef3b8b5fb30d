use super::preprocess::ProcessedChart;

/// Ramp-up span after a hold's head before its body carries full weight.
const RAMP_MS: i64 = 120;
/// Body weight during the first half of the ramp.
const RAMP_WEIGHT: f64 = 0.5;

/// Sparse piecewise-constant "hold-body mass over time", with prefix sums
/// for fast range integrals.
///
/// Each hold ramps up as a two-step staircase over the 120ms after its
/// head, carries weight 1 until its tail, then drops to zero. Stacked mass
/// from overlapping holds is damped so walls of holds do not dominate the
/// press curve.
pub struct HoldBodyMass {
    /// Segment boundaries; `values[i]` holds on `[times[i], times[i + 1])`.
    times: Vec<i64>,
    values: Vec<f64>,
    /// `prefix[i]` = integral over `[times[0], times[i]]`.
    prefix: Vec<f64>,
}

impl HoldBodyMass {
    pub fn new(chart: &ProcessedChart) -> Self {
        // Diff events: weight change at a timestamp.
        let mut events: Vec<(i64, f64)> = Vec::with_capacity(chart.ln_seq.len() * 3);

        for note in chart.ln_seq.iter() {
            let half_ramp = note.tail.min(note.head + RAMP_MS / 2);
            let full_ramp = note.tail.min(note.head + RAMP_MS);

            events.push((half_ramp, RAMP_WEIGHT));
            events.push((full_ramp, 1.0 - RAMP_WEIGHT));
            events.push((note.tail, -1.0));
        }

        events.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut times = Vec::with_capacity(events.len() + 2);
        let mut values = Vec::with_capacity(events.len() + 2);

        times.push(0);
        values.push(0.0);

        let mut mass = 0.0;

        for (time, change) in events {
            if Some(&time) != times.last() {
                times.push(time);
                values.push(0.0);
            }

            mass += change;

            if let Some(last) = values.last_mut() {
                // Stacked holds saturate instead of growing linearly.
                *last = mass.min(2.5 + 0.5 * mass);
            }
        }

        times.push(chart.duration.max(times.last().copied().unwrap_or(0)) + 1);
        values.push(0.0);

        let mut prefix = vec![0.0; times.len()];

        for i in 1..times.len() {
            prefix[i] = prefix[i - 1] + values[i - 1] * (times[i] - times[i - 1]) as f64;
        }

        Self {
            times,
            values,
            prefix,
        }
    }

    /// Integral of the hold-body mass over `[from, to)`, in weight ×
    /// milliseconds.
    pub fn sum_between(&self, from: i64, to: i64) -> f64 {
        self.integral_up_to(to) - self.integral_up_to(from)
    }

    fn integral_up_to(&self, q: i64) -> f64 {
        let first = self.times[0];
        let last = self.times[self.times.len() - 1];

        if q <= first {
            return 0.0;
        } else if q >= last {
            return self.prefix[self.prefix.len() - 1];
        }

        let i = self.times.partition_point(|&s| s <= q) - 1;

        self.prefix[i] + self.values[i] * (q - self.times[i]) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::{Chart, Note};

    fn mass_of(notes: Vec<Note>) -> HoldBodyMass {
        let chart = Chart::new(notes, 8).unwrap();

        HoldBodyMass::new(&ProcessedChart::new(&chart, 8.0, 1.0))
    }

    #[test]
    fn no_holds_means_no_mass() {
        let mass = mass_of(vec![Note::tap(0, 100), Note::tap(1, 500)]);

        assert_eq!(mass.sum_between(0, 1000), 0.0);
    }

    #[test]
    fn single_hold_integrates_ramp_and_body() {
        let mass = mass_of(vec![Note::hold(0, 0, 1000)]);

        // [0, 60): 0, [60, 120): 0.5, [120, 1000): 1.0
        let expected = 0.5 * 60.0 + 880.0;
        assert!((mass.sum_between(0, 2000) - expected).abs() < 1e-9);

        // Query windows clip correctly.
        assert!((mass.sum_between(120, 620) - 500.0).abs() < 1e-9);
        assert_eq!(mass.sum_between(1000, 2000), 0.0);
    }

    #[test]
    fn stacked_holds_are_damped() {
        let notes = (0..8).map(|k| Note::hold(k, 0, 1000)).collect();
        let mass = mass_of(notes);

        // Eight stacked bodies would carry mass 8; the damping caps the
        // plateau at 2.5 + 0.5 * 8 = 6.5.
        let plateau = mass.sum_between(120, 620) / 500.0;
        assert!((plateau - 6.5).abs() < 1e-9);
    }
}
