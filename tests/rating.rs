use mania_sr::{Chart, ChartError, Difficulty, Note};

fn single_column_stream() -> Chart {
    // 8 notes evenly spaced 200ms apart in column 0 only.
    let notes = (0..8).map(|i| Note::tap(0, i * 200)).collect();

    Chart::new(notes, 4).unwrap()
}

fn chord_wall() -> Chart {
    // Four simultaneous notes repeated every 100ms for 5 seconds.
    let notes = (0..50)
        .flat_map(|i| (0..4).map(move |k| Note::tap(k, i * 100)))
        .collect();

    Chart::new(notes, 4).unwrap()
}

#[test]
fn deterministic() {
    let chart = chord_wall();
    let difficulty = Difficulty::new().od(8.0).clock_rate(1.0);

    let a = difficulty.calculate(&chart).stars;
    let b = difficulty.calculate(&chart).stars;

    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn single_column_stream_is_low_to_moderate() {
    let attrs = Difficulty::new().od(8.0).calculate(&single_column_stream());

    assert!(attrs.stars.is_finite());
    assert!(attrs.stars > 0.0, "stars: {}", attrs.stars);
    assert!(attrs.stars < 4.0, "stars: {}", attrs.stars);
    assert_eq!(attrs.n_objects, 8);
    assert_eq!(attrs.n_hold_notes, 0);
}

#[test]
fn chord_wall_outrates_the_single_column_stream() {
    let stream = Difficulty::new().od(8.0).calculate(&single_column_stream());
    let chords = Difficulty::new().od(8.0).calculate(&chord_wall());

    assert!(
        chords.stars > stream.stars,
        "chords: {} vs stream: {}",
        chords.stars,
        stream.stars
    );
}

#[test]
fn single_note_is_bounded() {
    let chart = Chart::new(vec![Note::tap(2, 1000)], 7).unwrap();
    let attrs = Difficulty::new().od(8.0).calculate(&chart);

    assert!(attrs.stars.is_finite());
    assert!(attrs.stars >= 0.0);
    assert!(attrs.stars < 1.0, "stars: {}", attrs.stars);
}

#[test]
fn faster_rate_does_not_lower_a_dense_pattern() {
    let chart = chord_wall();

    let normal = Difficulty::new().od(8.0).clock_rate(1.0).calculate(&chart);
    let faster = Difficulty::new().od(8.0).clock_rate(1.5).calculate(&chart);

    // Sanity bound rather than strict inequality: the nonlinear clamps
    // allow equality but never a drop for a pattern this dense.
    assert!(
        faster.stars >= normal.stars,
        "faster: {} vs normal: {}",
        faster.stars,
        normal.stars
    );
}

#[test]
fn holds_rate_higher_than_their_tap_skeleton() {
    let holds: Vec<_> = (0..16)
        .map(|i| Note::hold((i % 4) as u8, i * 250, i * 250 + 200))
        .collect();
    let taps: Vec<_> = holds
        .iter()
        .map(|note| Note::tap(note.column, note.head))
        .collect();

    let with_holds = Difficulty::new()
        .od(8.0)
        .calculate(&Chart::new(holds, 4).unwrap());
    let tap_only = Difficulty::new()
        .od(8.0)
        .calculate(&Chart::new(taps, 4).unwrap());

    assert!(
        with_holds.stars > tap_only.stars,
        "holds: {} vs taps: {}",
        with_holds.stars,
        tap_only.stars
    );
    assert_eq!(with_holds.n_hold_notes, 16);
    assert_eq!(tap_only.n_hold_notes, 0);
}

#[test]
fn higher_od_rates_higher() {
    let chart = chord_wall();

    let lenient = Difficulty::new().od(5.0).calculate(&chart);
    let strict = Difficulty::new().od(10.0).calculate(&chart);

    assert!(
        strict.stars > lenient.stars,
        "od 10: {} vs od 5: {}",
        strict.stars,
        lenient.stars
    );
}

#[test]
fn unsupported_column_count_is_rejected() {
    let notes = vec![Note::tap(0, 0)];

    assert!(matches!(
        Chart::new(notes, 11),
        Err(ChartError::UnsupportedColumnCount(11))
    ));
}

#[test]
fn strains_align_with_corners() {
    let chart = chord_wall();
    let strains = Difficulty::new().od(8.0).strains(&chart);

    assert_eq!(strains.corners.len(), strains.difficulty.len());
    assert!(strains.corners.windows(2).all(|w| w[0] < w[1]));
    assert!(strains.difficulty.iter().all(|d| d.is_finite()));
    assert!(strains.difficulty.iter().copied().fold(0.0_f64, f64::max) > 0.0);
}
