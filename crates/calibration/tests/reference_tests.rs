//! Tests for the reference calibration check.

use calibration::{
    all_close, run_check, y_cold_atm_hot, CalibrationError, CalibrationMode, ReferenceDataset,
    Tolerance,
};
use test_utils::output_dir;

#[test]
fn test_embedded_reference_passes() {
    let ds = ReferenceDataset::embedded().unwrap();
    let report = run_check(&ds, Tolerance::default()).unwrap();
    assert_eq!(report.channels, 410);
    assert!(report.max_abs_residual <= 1e-8);
}

#[test]
fn test_calibrated_spectrum_matches_expected() {
    let ds = ReferenceDataset::embedded().unwrap();
    let y = y_cold_atm_hot(&ds.cold, &ds.atm, &ds.hot, ds.tcold, ds.thot, CalibrationMode::Calibrate).unwrap();
    assert!(all_close(&y, &ds.expected, Tolerance::default()));
}

#[test]
fn test_mutated_cold_load_fails() {
    let mut ds = ReferenceDataset::embedded().unwrap();
    ds.cold[100] += 5.0;

    let err = run_check(&ds, Tolerance::default()).unwrap_err();
    assert!(err.to_string().starts_with("Calibration fails to produce expected values"));
    match err {
        CalibrationError::Drift { channel, .. } => assert_eq!(channel, 100),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_swapped_temperatures_fail() {
    let mut ds = ReferenceDataset::embedded().unwrap();
    std::mem::swap(&mut ds.tcold, &mut ds.thot);
    assert!(matches!(
        run_check(&ds, Tolerance::default()),
        Err(CalibrationError::Drift { .. })
    ));
}

#[test]
fn test_loose_tolerance_accepts_small_drift() {
    let mut ds = ReferenceDataset::embedded().unwrap();
    ds.expected[0] += 1e-4;
    assert!(run_check(&ds, Tolerance::default()).is_err());
    assert!(run_check(&ds, Tolerance { rtol: 0.0, atol: 1e-3 }).is_ok());
}

#[test]
fn test_dataset_from_yaml_and_json() {
    let dir = output_dir();
    let ds = ReferenceDataset::embedded().unwrap();

    let yaml_path = dir.path().join("reference.yaml");
    std::fs::write(&yaml_path, serde_yaml::to_string(&ds).unwrap()).unwrap();
    let from_yaml = ReferenceDataset::from_path(&yaml_path).unwrap();
    assert_eq!(from_yaml.channels(), 410);
    run_check(&from_yaml, Tolerance::default()).unwrap();

    let json_path = dir.path().join("reference.json");
    std::fs::write(&json_path, serde_json::to_string(&ds).unwrap()).unwrap();
    assert_eq!(ReferenceDataset::from_path(&json_path).unwrap(), ds);
}

#[test]
fn test_dataset_bad_inputs() {
    let dir = output_dir();

    let txt = dir.path().join("reference.txt");
    std::fs::write(&txt, "cold: []").unwrap();
    assert!(matches!(
        ReferenceDataset::from_path(&txt),
        Err(CalibrationError::Dataset(_))
    ));

    assert!(matches!(
        ReferenceDataset::from_path(dir.path().join("missing.json")),
        Err(CalibrationError::Io(_))
    ));

    let short = dir.path().join("short.yaml");
    std::fs::write(
        &short,
        "cold: [1.0, 2.0]\natm: [1.5]\nhot: [3.0, 4.0]\ntcold: 10.0\nthot: 20.0\nexpected: [1.0, 2.0]\n",
    )
    .unwrap();
    let ds = ReferenceDataset::from_path(&short).unwrap();
    assert!(matches!(
        run_check(&ds, Tolerance::default()),
        Err(CalibrationError::LengthMismatch { .. })
    ));
}
