use super::preprocess::ProcessedChart;

/// The three time grids on which the component curves are evaluated.
///
/// Every piecewise term changes value at one of these corners; any other
/// time is reconstructed by interpolation. The exact construction is
/// load-bearing: the `±499/501` points bound the 500ms analysis windows,
/// the `s + 1` points resolve exact-coincidence spikes, and the `±1000`
/// points bound the wider windows of the imbalance curve.
pub struct CornerGrids {
    /// Corners for the 500ms-window curves.
    pub base: Vec<i64>,
    /// Corners for the 1000ms-window imbalance curve.
    pub a: Vec<i64>,
    /// Sorted union of `base` and `a`; the grid everything is combined on.
    pub all: Vec<i64>,
}

impl CornerGrids {
    pub fn new(chart: &ProcessedChart) -> Self {
        let mut base = Vec::with_capacity(chart.notes.len() * 8 + 2);
        let mut a = Vec::with_capacity(chart.notes.len() * 6 + 2);

        for note in chart.notes.iter() {
            for s in note_times(note) {
                base.extend_from_slice(&[s, s + 501, s - 499, s + 1]);
                a.extend_from_slice(&[s, s + 1000, s - 1000]);
            }
        }

        base.extend_from_slice(&[0, chart.duration]);
        a.extend_from_slice(&[0, chart.duration]);

        finish(&mut base, chart.duration);
        finish(&mut a, chart.duration);

        let mut all = Vec::with_capacity(base.len() + a.len());
        all.extend_from_slice(&base);
        all.extend_from_slice(&a);
        all.sort_unstable();
        all.dedup();

        Self { base, a, all }
    }
}

fn note_times(note: &crate::model::chart::Note) -> impl Iterator<Item = i64> {
    let tail = note.is_hold().then_some(note.tail);

    std::iter::once(note.head).chain(tail)
}

fn finish(corners: &mut Vec<i64>, duration: i64) {
    corners.retain(|&s| (0..=duration).contains(&s));
    corners.sort_unstable();
    corners.dedup();
}
