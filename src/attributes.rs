/// The result of a difficulty calculation on a keys chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultyAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The judge width used for the calculation; shrinks as the difficulty
    /// parameter grows.
    pub hit_leniency: f64,
    /// The amount of notes in the chart.
    pub n_objects: u32,
    /// The amount of hold notes in the chart.
    pub n_hold_notes: u32,
}

impl DifficultyAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.stars
    }

    /// Return the amount of notes.
    pub const fn n_objects(&self) -> u32 {
        self.n_objects
    }

    /// Return the amount of hold notes.
    pub const fn n_hold_notes(&self) -> u32 {
        self.n_hold_notes
    }
}

/// The instantaneous difficulty of a chart over time.
///
/// Suitable to plot the difficulty of a chart. Each entry of `difficulty`
/// belongs to the matching entry of `corners`, the (clock-rate adjusted)
/// times in milliseconds at which the difficulty was sampled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strains {
    /// Sample times in milliseconds.
    pub corners: Vec<i64>,
    /// Instantaneous difficulty at each corner.
    pub difficulty: Vec<f64>,
}
