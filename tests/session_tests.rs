//! Inspection session flows as an inspection station would drive them.

use fabric_grading::{
    DefectObservation, DefectPosition, Grade, InspectionSample, InspectionSession, QualityThresholds,
    SessionError, SessionState, StaticCatalog,
};

fn new_session() -> InspectionSession {
    InspectionSession::new(
        InspectionSample::new("B-3001", "SO-77", "Canvas").with_measurements(100.0, 160.0, 41.0),
    )
}

#[test]
fn full_inspection_flow() {
    let thresholds = QualityThresholds::default();
    let catalog = StaticCatalog::standard();
    let mut session = new_session();
    assert_eq!(session.state(), SessionState::Empty);

    let slub = session
        .add_observation(DefectObservation::new("", "slub", DefectPosition::Center).at_offset(12.0))
        .unwrap();
    let hole = session
        .add_observation(DefectObservation::new("", "hole", DefectPosition::Center).at_offset(48.5))
        .unwrap();
    assert_eq!(session.observations().len(), 2);
    assert_eq!(session.state(), SessionState::HasDefects);

    // slub 3.6 + hole 18.0 = 21.6 per 100
    let report = session.evaluate(&thresholds, &catalog, None).unwrap();
    assert_eq!(report.grade, Grade::B);
    assert_eq!(session.state(), SessionState::Evaluated);

    // The hole turned out to be on the selvedge
    session
        .update_observation(&hole, |o| o.position = DefectPosition::RightEdge)
        .unwrap();
    assert!(session.report().is_none());

    // slub 3.6 + hole 12.0 = 15.6 per 100, one critical allowed in A2
    let report = session.evaluate(&thresholds, &catalog, None).unwrap();
    assert_eq!(report.grade, Grade::A2);

    session.remove_observation(&hole).unwrap();
    let report = session.evaluate(&thresholds, &catalog, None).unwrap();
    assert_eq!(report.grade, Grade::A1);
    assert_eq!(report.defects.len(), 1);
    assert_eq!(report.defects[0].observation_id, slub);

    let (sample, report) = session.into_parts();
    assert_eq!(sample.observations.len(), 1);
    assert!(report.is_some());
}

#[test]
fn editing_the_sample_discards_the_report() {
    let mut session = new_session();
    session
        .evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
        .unwrap();
    assert_eq!(session.state(), SessionState::Evaluated);

    session.edit_sample(|s| s.total_length = 50.0).unwrap();
    assert!(session.report().is_none());
    assert_eq!(session.state(), SessionState::Empty);
}

#[test]
fn report_never_describes_stale_observations() {
    let thresholds = QualityThresholds::default();
    let catalog = StaticCatalog::standard();
    let mut session = new_session();

    for defect in ["knot", "slub", "float", "broken_pick"] {
        session
            .add_observation(DefectObservation::new("", defect, DefectPosition::FullWidth))
            .unwrap();
        let count = session.observations().len();
        let report = session.evaluate(&thresholds, &catalog, None).unwrap();
        assert_eq!(report.defects.len(), count);
    }
}

#[test]
fn explicit_ids_are_kept_and_checked() {
    let mut session = new_session();
    let id = session
        .add_observation(DefectObservation::new("station-2/17", "knot", DefectPosition::Other))
        .unwrap();
    assert_eq!(id, "station-2/17");

    let err = session
        .add_observation(DefectObservation::new("station-2/17", "slub", DefectPosition::Other))
        .unwrap_err();
    assert_eq!(err, SessionError::DuplicateObservation("station-2/17".to_string()));
    assert_eq!(
        err.to_string(),
        "An observation with id 'station-2/17' already exists in this session"
    );
}

#[test]
fn failed_edit_keeps_the_report() {
    let mut session = new_session();
    session
        .evaluate(&QualityThresholds::default(), &StaticCatalog::standard(), None)
        .unwrap();

    assert!(session.remove_observation("obs-404").is_err());
    assert!(session.report().is_some());
}
