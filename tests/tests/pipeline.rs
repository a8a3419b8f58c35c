use glyco_ai::{
    assemble, predict, ArtifactKind, ArtifactPaths, ArtifactStore, DefaultMeans, LoadError,
    PredictionError, RiskLabel,
};
use pretty_assertions::assert_eq;
use std::fs;
use tests::{artifact_dir, load_store, observation};

#[test]
fn high_hba1c_scenario_predicts_yes() {
    let store = load_store();
    let r = predict(&store, &observation(45, "Male", 9.2, 31.4, 220.0, 180.0)).unwrap();
    assert_eq!(r.label, RiskLabel::Yes);
    assert!(r.confidence() > 50.0);
    assert_eq!(r.confidence_text(), "81.8");
}

#[test]
fn low_hba1c_scenario_predicts_no() {
    let store = load_store();
    let r = predict(&store, &observation(25, "Female", 4.8, 21.0, 150.0, 90.0)).unwrap();
    assert_eq!(r.label, RiskLabel::No);
    assert!(r.confidence() > 50.0);
    assert_eq!(r.confidence_text(), "85.8");
}

#[test]
fn every_valid_input_gives_a_bounded_result() {
    let store = load_store();
    for gender in ["Male", "Female", "MALE", "female"] {
        for age in [1, 40, 120] {
            for hba1c in [0.0, 6.5, 20.0] {
                for bmi in [10.0, 25.0, 60.0] {
                    for (chol, tg) in [(50.0, 10.0), (200.0, 200.0), (600.0, 2000.0)] {
                        let obs = observation(age, gender, hba1c, bmi, chol, tg);
                        let r = predict(&store, &obs).unwrap_or_else(|e| panic!("{obs:?}: {e}"));
                        assert!(matches!(r.label, RiskLabel::Yes | RiskLabel::No));
                        let c = r.confidence();
                        assert!((0.0..=100.0).contains(&c), "{obs:?} -> {c}");
                    }
                }
            }
        }
    }
}

#[test]
fn prediction_is_deterministic() {
    let store = load_store();
    let obs = observation(61, "Female", 7.3, 28.2, 240.0, 310.0);
    let first = predict(&store, &obs).unwrap();
    for _ in 0..10 {
        assert_eq!(predict(&store, &obs).unwrap(), first);
    }
}

#[test]
fn unknown_gender_does_not_poison_later_requests() {
    let store = load_store();
    let bad = predict(&store, &observation(45, "X", 9.2, 31.4, 220.0, 180.0));
    assert_eq!(bad, Err(PredictionError::UnknownCategory("X".into())));

    let good = predict(&store, &observation(45, "Male", 9.2, 31.4, 220.0, 180.0)).unwrap();
    assert_eq!(good.label, RiskLabel::Yes);
}

#[test]
fn hba1c_boundaries_assemble() {
    let store = load_store();
    for hba1c in [0.0, 20.0] {
        let obs = observation(50, "Male", hba1c, 30.0, 200.0, 150.0);
        assert!(assemble(&obs, store.gender_encoder(), store.default_means()).is_ok());
        assert!(predict(&store, &obs).is_ok());
    }
}

#[test]
fn defaulted_columns_come_from_shipped_means() {
    let store = load_store();
    let obs = observation(50, "Male", 6.0, 30.0, 200.0, 150.0);
    let v = assemble(&obs, store.gender_encoder(), store.default_means()).unwrap();
    let means = DefaultMeans::load(artifact_dir().join("column_means.json")).unwrap();
    for column in ["Urea", "Cr", "HDL", "LDL", "VLDL"] {
        assert_eq!(v.get(column), Some(means.get(column)), "{column}");
    }
}

#[test]
fn means_without_defaulted_columns_still_predict() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    copy_artifacts(tmp.path());
    fs::write(tmp.path().join("column_means.json"), "{}").unwrap();

    let store = ArtifactStore::initialize(&ArtifactPaths::in_dir(tmp.path())).unwrap();
    let obs = observation(50, "Male", 6.0, 30.0, 200.0, 150.0);
    let v = assemble(&obs, store.gender_encoder(), store.default_means()).unwrap();
    assert_eq!(v.get("Urea"), Some(0.0));
    assert!(predict(&store, &obs).is_ok());
}

#[test]
fn corrupt_classifier_is_a_startup_failure() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    copy_artifacts(tmp.path());
    let model = tmp.path().join("diabetes_model.json");
    let mut doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&model).unwrap()).unwrap();
    doc["learner"]["gradient_booster"]["model"]["trees"] = serde_json::json!([]);
    fs::write(&model, doc.to_string()).unwrap();

    let err = ArtifactStore::initialize(&ArtifactPaths::in_dir(tmp.path())).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt { kind: ArtifactKind::Classifier, .. }), "{err}");
}

#[test]
fn missing_artifact_dir_is_a_startup_failure() {
    let tmp = tempfile::tempdir().expect("tmpdir");
    let err = ArtifactStore::initialize(&ArtifactPaths::in_dir(tmp.path().join("absent"))).unwrap_err();
    assert_eq!(err.kind(), ArtifactKind::Classifier);
}

fn copy_artifacts(to: &std::path::Path) {
    for name in ["diabetes_model.json", "scaler.json", "le_gender.json", "column_means.json"] {
        fs::copy(artifact_dir().join(name), to.join(name)).unwrap();
    }
}
