use boundary_sketch::{
    accuracy, classify, Accuracy, BoundaryKind, BoundaryModel, ClassificationEngine,
    CoordinateMapper, DataPoint, DataRange, Dataset, DisplayExtent, Label, Observation,
};

fn mapper() -> CoordinateMapper {
    CoordinateMapper::new(
        DataRange::new(30.0, 60.0, 12.0, 22.0),
        DisplayExtent::new(800.0, 500.0).unwrap(),
    )
}

fn draw(kind: BoundaryKind, mapper: &CoordinateMapper, points: &[(f64, f64)]) -> BoundaryModel {
    let mut boundary = BoundaryModel::new(kind);
    let mut display = points
        .iter()
        .map(|&(x, y)| mapper.to_display(DataPoint::new(x, y)));

    boundary.start_stroke(display.next().unwrap()).unwrap();
    for p in display {
        boundary.append_point(p).unwrap();
    }
    boundary.finalize_stroke();
    boundary
}

#[test]
fn diagonal_line_scenario() {
    let m = mapper();
    let line = draw(BoundaryKind::Line, &m, &[(30.0, 12.0), (60.0, 22.0)]);
    let training = [Observation::new(Label::A, 35.0, 13.0)];

    let query = Observation::new(Label::B, 55.0, 21.0);
    assert_eq!(classify(&query, &line, &m, &training), Some(Label::B));
    assert_eq!(classify(&training[0], &line, &m, &training), Some(Label::A));
}

#[test]
fn line_labels_survive_vertex_swap() {
    let m = mapper();
    let training = [
        Observation::new(Label::B, 52.0, 20.0),
        Observation::new(Label::A, 36.0, 14.5),
    ];

    for &(a, b) in &[
        ((30.0, 12.0), (60.0, 22.0)),
        ((31.0, 21.0), (58.0, 13.0)),
        ((45.0, 12.0), (45.5, 22.0)),
    ] {
        let forward = draw(BoundaryKind::Line, &m, &[a, b]);
        let backward = draw(BoundaryKind::Line, &m, &[b, a]);
        let f = ClassificationEngine::new(&forward, &m, &training);
        let r = ClassificationEngine::new(&backward, &m, &training);

        for i in 0..=60 {
            for j in 0..=40 {
                let q = DataPoint::new(30.0 + i as f64 * 0.5, 12.0 + j as f64 * 0.25);
                assert_eq!(f.classify(q), r.classify(q), "{a:?}-{b:?} at {q:?}");
            }
        }
    }
}

#[test]
fn closed_curve_inside_points_have_odd_parity() {
    let m = mapper();
    let square = draw(
        BoundaryKind::Curve,
        &m,
        &[
            (40.0, 15.0),
            (50.0, 15.0),
            (50.0, 19.0),
            (40.0, 19.0),
            (40.0, 15.0),
        ],
    );
    // anchor outside the loop
    let training = [Observation::new(Label::A, 32.0, 13.0)];
    let engine = ClassificationEngine::new(&square, &m, &training);

    for i in 1..10 {
        for j in 1..8 {
            let inside = DataPoint::new(40.0 + i as f64, 15.0 + j as f64 * 0.5);
            assert_eq!(engine.classify(inside), Some(Label::B), "{inside:?}");
            assert_eq!(engine.classify(inside), Some(Label::B), "{inside:?}");
        }
    }
    assert_eq!(engine.classify(DataPoint::new(55.0, 17.0)), Some(Label::A));
    assert_eq!(engine.classify(DataPoint::new(35.0, 17.0)), Some(Label::A));
}

#[test]
fn v_curve_separates_above_and_below_apex() {
    let m = mapper();
    let v = draw(
        BoundaryKind::Curve,
        &m,
        &[(35.0, 21.0), (45.0, 14.0), (55.0, 21.0)],
    );
    let training = [Observation::new(Label::A, 45.0, 18.0)];
    let engine = ClassificationEngine::new(&v, &m, &training);

    let above = engine.classify(DataPoint::new(45.0, 16.0));
    let below = engine.classify(DataPoint::new(45.0, 13.0));
    assert!(above.is_some() && below.is_some());
    assert_ne!(above, below);

    let on_segment = DataPoint::new(50.0, 17.5);
    let first = engine.classify(on_segment);
    for _ in 0..50 {
        assert_eq!(engine.classify(on_segment), first);
    }
}

#[test]
fn accuracy_is_exact_ratio_within_bounds() {
    let m = mapper();
    let line = draw(BoundaryKind::Line, &m, &[(30.0, 12.0), (60.0, 22.0)]);
    let observations: Vec<Observation> = (0..40)
        .map(|i| {
            let x = 30.0 + (i % 10) as f64 * 3.0;
            let y = 12.0 + (i / 4) as f64;
            let label = if i % 3 == 0 { Label::B } else { Label::A };
            Observation::new(label, x, y)
        })
        .collect();
    let ds = Dataset::from_parts(observations[..30].to_vec(), observations[30..].to_vec()).unwrap();

    for subset in [ds.training(), ds.evaluation()] {
        match accuracy(subset, &line, &m, ds.training()) {
            Accuracy::Scored(r) => {
                assert_eq!(r.total, subset.len());
                assert!((0.0..=1.0).contains(&r.accuracy));
                assert_eq!(r.accuracy, r.correct as f64 / r.total as f64);
            }
            Accuracy::Undefined => panic!("expected a score"),
        }
    }
}

#[test]
fn empty_training_subset_is_undefined() {
    let m = mapper();
    let line = draw(BoundaryKind::Line, &m, &[(30.0, 12.0), (60.0, 22.0)]);
    let ds = Dataset::from_parts(
        Vec::new(),
        vec![
            Observation::new(Label::A, 35.0, 13.0),
            Observation::new(Label::B, 55.0, 21.0),
        ],
    )
    .unwrap();

    let acc = accuracy(ds.training(), &line, &m, ds.training());
    assert_eq!(acc, Accuracy::Undefined);
    assert_eq!(acc.value(), None);
}

#[test]
fn mapper_round_trip_after_resizes() {
    let mut m = mapper();
    for (w, h) in [(320.0, 200.0), (1920.0, 1080.0), (777.0, 333.0)] {
        m.set_extent(DisplayExtent::new(w, h).unwrap());
        for i in 0..=30 {
            for j in 0..=10 {
                let p = DataPoint::new(30.0 + i as f64, 12.0 + j as f64);
                let back = m.to_data(m.to_display(p));
                assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
            }
        }
    }
}
