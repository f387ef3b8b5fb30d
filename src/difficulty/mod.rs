use crate::{
    attributes::{DifficultyAttributes, Strains},
    model::chart::Chart,
    util::interp::{lerp_on_corners, step_on_corners},
};

use self::{
    activity::Activity,
    aggregate::CombinedCurves,
    corners::CornerGrids,
    hold_body::HoldBodyMass,
    preprocess::ProcessedChart,
};

mod activity;
mod aggregate;
mod corners;
mod evaluators;
mod hold_body;
mod preprocess;

/// Difficulty calculator on keys charts.
///
/// The calculation is deterministic: the same chart, `od`, and clock rate
/// always produce bit-identical results.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Difficulty {
    od: f64,
    clock_rate: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

impl Difficulty {
    /// Create a new difficulty calculator.
    pub const fn new() -> Self {
        Self {
            od: 8.0,
            clock_rate: 1.0,
        }
    }

    /// Specify the OD-like difficulty parameter.
    ///
    /// Clamped to `0.0..=15.0`.
    pub const fn od(self, od: f64) -> Self {
        Self { od, ..self }
    }

    /// Adjust the clock rate used in the calculation, e.g. `1.5` for a
    /// chart played 50% faster.
    ///
    /// Clamped to `0.01..=100.0`.
    pub const fn clock_rate(self, clock_rate: f64) -> Self {
        Self { clock_rate, ..self }
    }

    /// Perform the difficulty calculation.
    pub fn calculate(&self, chart: &Chart) -> DifficultyAttributes {
        let values = DifficultyValues::calculate(self, chart);

        DifficultyAttributes {
            stars: values.stars,
            hit_leniency: values.hit_leniency,
            n_objects: chart.n_objects(),
            n_hold_notes: chart.n_hold_notes(),
        }
    }

    /// Perform the calculation but return the instantaneous difficulty
    /// over time instead of the final skill value.
    ///
    /// Suitable to plot the difficulty of a chart.
    pub fn strains(&self, chart: &Chart) -> Strains {
        let values = DifficultyValues::calculate(self, chart);

        Strains {
            corners: values.all_corners,
            difficulty: values.difficulty,
        }
    }

    pub(crate) fn get_clock_rate(&self) -> f64 {
        self.clock_rate.clamp(0.01, 100.0)
    }
}

pub(crate) struct DifficultyValues {
    pub stars: f64,
    pub hit_leniency: f64,
    pub all_corners: Vec<i64>,
    pub difficulty: Vec<f64>,
}

impl DifficultyValues {
    pub fn calculate(difficulty: &Difficulty, chart: &Chart) -> Self {
        let chart = ProcessedChart::new(chart, difficulty.od, difficulty.get_clock_rate());
        let grids = CornerGrids::new(&chart);
        let activity = Activity::new(&chart, &grids.base);
        let hold_mass = HoldBodyMass::new(&chart);

        // The five component curves are independent of one another; each
        // lives on its own grid until resampled below.
        let jack = evaluators::jack::evaluate(&chart, &grids.base);
        let cross = evaluators::cross::evaluate(&chart, &grids.base, &activity.usage);
        let press = evaluators::press::evaluate(&chart, &grids.base, &activity.anchor, &hold_mass);
        let imbalance = evaluators::anchor::evaluate(&chart, &grids.a);
        let release = evaluators::release::evaluate(&chart, &grids.base);
        let density = evaluators::density::note_density(&chart, &grids.base);
        let active_keys = evaluators::density::active_keys(&activity.active_columns);

        let curves = CombinedCurves {
            jack: lerp_on_corners(&grids.all, &grids.base, &jack),
            cross: lerp_on_corners(&grids.all, &grids.base, &cross),
            press: lerp_on_corners(&grids.all, &grids.base, &press),
            imbalance: lerp_on_corners(&grids.all, &grids.a, &imbalance),
            release: lerp_on_corners(&grids.all, &grids.base, &release),
            density: step_on_corners(&grids.all, &grids.base, &density),
            active_keys: step_on_corners(&grids.all, &grids.base, &active_keys),
        };

        let (stars, difficulty) = aggregate::rating(&chart, &grids.all, &curves);

        #[cfg(feature = "tracing")]
        {
            let peak = |curve: &[f64]| curve.iter().copied().fold(0.0_f64, f64::max);

            tracing::debug!(
                stars,
                jack_peak = peak(&curves.jack),
                cross_peak = peak(&curves.cross),
                press_peak = peak(&curves.press),
                release_peak = peak(&curves.release),
                "calculated difficulty"
            );
        }

        Self {
            stars,
            hit_leniency: chart.hit_leniency,
            all_corners: grids.all,
            difficulty,
        }
    }
}
