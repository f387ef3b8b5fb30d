use super::preprocess::ProcessedChart;

/// Percentile targets averaged into the "93rd percentile" difficulty.
const TARGETS_93: [f64; 4] = [0.945, 0.935, 0.925, 0.915];
/// Percentile targets averaged into the "83rd percentile" difficulty.
const TARGETS_83: [f64; 4] = [0.845, 0.835, 0.825, 0.815];

const WEIGHT_93: f64 = 0.25;
const WEIGHT_83: f64 = 0.2;
const WEIGHT_MEAN: f64 = 0.55;
const SCALE_93: f64 = 0.88;
const SCALE_83: f64 = 0.94;

/// Note count at which a chart reaches half of the length correction.
const LENGTH_PIVOT: f64 = 60.0;

const RESCALE_KNEE: f64 = 9.0;
const RESCALE_SLOPE: f64 = 1.2;
const CALIBRATION: f64 = 0.975;

/// The component curves, all resampled onto the `all_corners` grid.
pub struct CombinedCurves {
    pub jack: Vec<f64>,
    pub cross: Vec<f64>,
    pub press: Vec<f64>,
    pub imbalance: Vec<f64>,
    pub release: Vec<f64>,
    pub density: Vec<f64>,
    pub active_keys: Vec<f64>,
}

impl CombinedCurves {
    /// Pointwise instantaneous difficulty `D` at each corner.
    fn instantaneous(&self) -> Vec<f64> {
        (0..self.jack.len())
            .map(|i| {
                let abar = self.imbalance[i].max(0.0);
                let jbar = self.jack[i].max(0.0);
                let pbar = self.press[i].max(0.0);
                let rbar = self.release[i].max(0.0);
                let xbar = self.cross[i].max(0.0);

                let gate = abar.powf(3.0 / self.active_keys[i]);

                let term1 = gate * jbar.min(8.0 + 0.85 * jbar);
                let term2 =
                    abar.powf(2.0 / 3.0) * (0.8 * pbar + rbar * 35.0 / (self.density[i] + 8.0));

                let strain =
                    (0.4 * term1.powf(1.5) + 0.6 * term2.powf(1.5)).powf(2.0 / 3.0);
                let twist = gate * xbar / (xbar + strain + 1.0);

                2.7 * strain.sqrt() * twist.powf(1.5) + 0.27 * strain
            })
            .collect()
    }
}

/// Reduce the instantaneous difficulty over time into the star rating.
///
/// Corners are weighted by local density times their half-gap, then the
/// rating mixes two weighted percentile averages with a weighted 5th-power
/// mean, nerfs short charts, and applies the final rescale.
pub fn rating(chart: &ProcessedChart, all_corners: &[i64], curves: &CombinedCurves) -> (f64, Vec<f64>) {
    let difficulty = curves.instantaneous();

    let weights: Vec<f64> = (0..all_corners.len())
        .map(|i| {
            let left = all_corners[i.saturating_sub(1)];
            let right = all_corners[(i + 1).min(all_corners.len() - 1)];

            curves.density[i] * (right - left) as f64 / 2.0
        })
        .collect();

    let total_weight: f64 = weights.iter().sum();

    // Percentiles over the difficulty-sorted corners.
    let mut order: Vec<usize> = (0..difficulty.len()).collect();
    order.sort_unstable_by(|&a, &b| difficulty[a].total_cmp(&difficulty[b]));

    let mut cumulative = Vec::with_capacity(order.len());
    let mut acc = 0.0;

    for &i in &order {
        acc += weights[i];
        cumulative.push(acc / total_weight.max(f64::MIN_POSITIVE));
    }

    let percentile_avg = |targets: &[f64]| {
        let sum: f64 = targets
            .iter()
            .map(|&target| {
                let i = cumulative.partition_point(|&c| c < target);

                difficulty[order[i.min(order.len() - 1)]]
            })
            .sum();

        sum / targets.len() as f64
    };

    let p93 = percentile_avg(&TARGETS_93);
    let p83 = percentile_avg(&TARGETS_83);

    let mean: f64 = difficulty
        .iter()
        .zip(weights.iter())
        .map(|(d, w)| d.powi(5) * w)
        .sum::<f64>()
        / total_weight.max(f64::MIN_POSITIVE);
    let mean = mean.powf(0.2);

    let mut sr = WEIGHT_93 * SCALE_93 * p93 + WEIGHT_83 * SCALE_83 * p83 + WEIGHT_MEAN * mean;

    // Short charts are nerfed towards zero.
    let total_notes = chart.notes.len() as f64
        + 0.5
            * chart
                .ln_seq
                .iter()
                .map(|hold| hold.hold_duration().min(1000) as f64 / 200.0)
                .sum::<f64>();
    sr *= total_notes / (total_notes + LENGTH_PIVOT);

    sr = rescale_high(sr) * CALIBRATION;

    (sr.max(0.0), difficulty)
}

/// Soft-clamp to keep extreme charts within the conventional rating range.
fn rescale_high(sr: f64) -> f64 {
    if sr <= RESCALE_KNEE {
        sr
    } else {
        RESCALE_KNEE + (sr - RESCALE_KNEE) / RESCALE_SLOPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_is_monotone_and_continuous() {
        assert_eq!(rescale_high(5.0), 5.0);
        assert!((rescale_high(9.0) - 9.0).abs() < 1e-12);
        assert!((rescale_high(10.2) - 10.0).abs() < 1e-12);
        assert!(rescale_high(12.0) > rescale_high(11.0));
    }
}
