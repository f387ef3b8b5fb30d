use std::cmp::Ordering;

/// Smallest supported column count.
pub const MIN_COLUMNS: u8 = 1;

/// Largest supported column count, bounded by the cross-influence
/// coefficient table.
pub const MAX_COLUMNS: u8 = 10;

/// A single playable event in one column.
///
/// Either an instantaneous tap (`tail == head`) or a hold note
/// (`tail > head`). All times are integer milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Note {
    /// 0-based column index, strictly less than the chart's column count.
    pub column: u8,
    /// Press time in milliseconds.
    pub head: i64,
    /// Release time in milliseconds; equal to `head` for a tap.
    pub tail: i64,
}

impl Note {
    /// An instantaneous tap note.
    pub const fn tap(column: u8, time: i64) -> Self {
        Self {
            column,
            head: time,
            tail: time,
        }
    }

    /// A hold note pressed at `head` and released at `tail`.
    pub const fn hold(column: u8, head: i64, tail: i64) -> Self {
        Self { column, head, tail }
    }

    pub const fn is_hold(&self) -> bool {
        self.tail > self.head
    }

    pub const fn hold_duration(&self) -> i64 {
        self.tail - self.head
    }
}

/// All the ways that building a [`Chart`] can fail.
///
/// The numeric pipeline itself is infallible; every input contract of the
/// calculation is checked here, once, when the chart is constructed.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart contains no notes")]
    EmptyChart,
    #[error("column count {0} is outside the supported range 1..=10")]
    UnsupportedColumnCount(u8),
    #[error("note at {time}ms sits in column {column} but the chart only has {column_count} columns")]
    ColumnOutOfRange {
        column: u8,
        column_count: u8,
        time: i64,
    },
    #[error("note at {head}ms must not end earlier than it starts (tail {tail}ms)")]
    TailBeforeHead { head: i64, tail: i64 },
    #[error("note at {0}ms has a negative timestamp")]
    NegativeTime(i64),
}

/// A full, validated keys chart: the input of the difficulty calculation.
///
/// Notes are stored sorted by head time, ties broken by column. The chart is
/// immutable once constructed; the calculation only ever works on derived
/// copies (e.g. after applying a clock rate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chart {
    notes: Box<[Note]>,
    column_count: u8,
}

impl Chart {
    /// Create a new chart from a note list and its column count.
    ///
    /// Validates everything the calculation relies on: a non-empty note
    /// list, a column count within `1..=10`, in-range column indices,
    /// non-negative times, and `tail >= head` for every note.
    pub fn new(mut notes: Vec<Note>, column_count: u8) -> Result<Self, ChartError> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&column_count) {
            return Err(ChartError::UnsupportedColumnCount(column_count));
        }

        if notes.is_empty() {
            return Err(ChartError::EmptyChart);
        }

        for note in notes.iter() {
            if note.column >= column_count {
                return Err(ChartError::ColumnOutOfRange {
                    column: note.column,
                    column_count,
                    time: note.head,
                });
            }

            if note.head < 0 {
                return Err(ChartError::NegativeTime(note.head));
            }

            if note.tail < note.head {
                return Err(ChartError::TailBeforeHead {
                    head: note.head,
                    tail: note.tail,
                });
            }
        }

        notes.sort_unstable_by(cmp_note);

        Ok(Self {
            notes: notes.into_boxed_slice(),
            column_count,
        })
    }

    /// All notes, sorted by head time, ties broken by column.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub const fn column_count(&self) -> u8 {
        self.column_count
    }

    /// The amount of notes in the chart.
    pub fn n_objects(&self) -> u32 {
        self.notes.len() as u32
    }

    /// The amount of hold notes in the chart.
    pub fn n_hold_notes(&self) -> u32 {
        self.notes.iter().filter(|note| note.is_hold()).count() as u32
    }
}

fn cmp_note(a: &Note, b: &Note) -> Ordering {
    a.head.cmp(&b.head).then(a.column.cmp(&b.column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_chart() {
        assert!(matches!(
            Chart::new(Vec::new(), 4),
            Err(ChartError::EmptyChart)
        ));
    }

    #[test]
    fn rejects_unsupported_column_counts() {
        let notes = vec![Note::tap(0, 0)];

        assert!(matches!(
            Chart::new(notes.clone(), 0),
            Err(ChartError::UnsupportedColumnCount(0))
        ));
        assert!(matches!(
            Chart::new(notes, 11),
            Err(ChartError::UnsupportedColumnCount(11))
        ));
    }

    #[test]
    fn rejects_out_of_range_column() {
        let notes = vec![Note::tap(4, 100)];

        assert!(matches!(
            Chart::new(notes, 4),
            Err(ChartError::ColumnOutOfRange { column: 4, .. })
        ));
    }

    #[test]
    fn rejects_inverted_hold() {
        let notes = vec![Note::hold(0, 500, 100)];

        assert!(matches!(
            Chart::new(notes, 4),
            Err(ChartError::TailBeforeHead { .. })
        ));
    }

    #[test]
    fn sorts_notes_by_head_then_column() {
        let notes = vec![Note::tap(3, 200), Note::tap(1, 100), Note::tap(0, 200)];
        let chart = Chart::new(notes, 4).unwrap();

        let order: Vec<_> = chart.notes().iter().map(|n| (n.head, n.column)).collect();
        assert_eq!(order, vec![(100, 1), (200, 0), (200, 3)]);
    }
}
