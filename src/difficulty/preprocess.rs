use crate::model::chart::{Chart, Note};

/// The canonical, rate-adjusted form of a chart that every later stage
/// works on.
///
/// All derived sequences share the same note values; nothing here is
/// mutated after construction.
pub struct ProcessedChart {
    pub column_count: usize,
    /// All notes sorted by head time, ties broken by column.
    pub notes: Vec<Note>,
    /// Notes bucketed per column, each bucket sorted by head time.
    pub columns: Vec<Vec<Note>>,
    /// The hold notes, sorted by head time.
    pub ln_seq: Vec<Note>,
    /// The hold notes, re-sorted by tail time.
    pub tail_seq: Vec<Note>,
    /// `1 + ` the last head/tail time, in (rate-adjusted) milliseconds.
    pub duration: i64,
    /// The judge width `x`.
    pub hit_leniency: f64,
}

impl ProcessedChart {
    pub fn new(chart: &Chart, od: f64, clock_rate: f64) -> Self {
        let column_count = usize::from(chart.column_count());

        // Timing-grid math always happens in rate-adjusted time: scale
        // first, truncate to integer milliseconds, only then derive
        // anything else.
        let mut notes: Vec<Note> = chart
            .notes()
            .iter()
            .map(|note| Note {
                column: note.column,
                head: (note.head as f64 / clock_rate) as i64,
                tail: (note.tail as f64 / clock_rate) as i64,
            })
            .collect();

        notes.sort_unstable_by(|a, b| a.head.cmp(&b.head).then(a.column.cmp(&b.column)));

        let mut columns = vec![Vec::new(); column_count];

        for note in notes.iter() {
            columns[usize::from(note.column)].push(*note);
        }

        let ln_seq: Vec<Note> = notes.iter().copied().filter(Note::is_hold).collect();

        let mut tail_seq = ln_seq.clone();
        tail_seq.sort_by(|a, b| a.tail.cmp(&b.tail).then(a.column.cmp(&b.column)));

        let duration = 1 + notes
            .iter()
            .map(|note| note.head.max(note.tail))
            .max()
            .unwrap_or(0);

        Self {
            column_count,
            notes,
            columns,
            ln_seq,
            tail_seq,
            duration,
            hit_leniency: hit_leniency(od),
        }
    }
}

/// The judge width `x` derived from the OD-like difficulty parameter.
///
/// Shrinks as `od` grows; the convexity clamp keeps extreme settings from
/// running away.
fn hit_leniency(od: f64) -> f64 {
    let od = od.clamp(0.0, 15.0);
    let x = 0.3 * ((64.5 - (od * 3.0).ceil()) / 500.0).sqrt();

    x.min(0.6 * (x - 0.09) + 0.09)
}
