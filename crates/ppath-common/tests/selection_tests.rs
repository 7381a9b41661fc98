//! Tests for path field selection and merging.

use ppath_common::{select_fields, PathRecord, PpathError, SampleMatrix, SelectionMode};
use test_utils::{
    antimeridian_path, limb_path_list, one_dimensional_path, tied_minimum_path,
    two_column_end_path, write_record, output_dir,
};

// ============================================================================
// Selection modes
// ============================================================================

#[test]
fn test_all_mode_returns_columns() {
    let fields = select_fields(&antimeridian_path(), SelectionMode::All).unwrap();
    assert_eq!(fields.radius, vec![80e3, 40e3, 35e3, 70e3]);
    assert_eq!(fields.lat_deg, vec![10.0, 11.0, 12.0, 13.0]);
    assert_eq!(fields.lon_deg, vec![170.0, 175.0, -170.0, -175.0]);
    assert_eq!(fields.za_rad.len(), 4);
    assert!((fields.aa_rad[3] - 88f64.to_radians()).abs() < 1e-15);
}

#[test]
fn test_lowest_mode_keeps_ties_in_order() {
    let record = tied_minimum_path();
    assert_eq!(record.lowest_indices().unwrap(), vec![1, 2]);

    let fields = select_fields(&record, SelectionMode::Lowest).unwrap();
    assert_eq!(fields.radius, vec![2.0, 2.0]);
    assert_eq!(fields.lat_deg, vec![1.0, 2.0]);
    assert_eq!(fields.za_rad, vec![91f64.to_radians(), 92f64.to_radians()]);
}

/// Record with radius and line of sight but no position columns.
fn los_only_path() -> PathRecord {
    PathRecord {
        los: SampleMatrix::from_rows(&[[90.0, 10.0], [91.0, 20.0]]).unwrap(),
        r: vec![5.0, 2.0],
        ..Default::default()
    }
}

#[test]
fn test_lowest_mode_without_position_columns() {
    let record = los_only_path();
    let all = select_fields(&record, SelectionMode::All).unwrap();
    assert!(all.radius.is_empty() && all.lat_deg.is_empty() && all.lon_deg.is_empty());
    assert_eq!(all.za_rad.len(), 2);

    let fields = select_fields(&record, SelectionMode::Lowest).unwrap();
    assert!(fields.radius.is_empty());
    assert!(fields.lat_deg.is_empty());
    assert!(fields.lon_deg.is_empty());
    assert_eq!(fields.za_rad, vec![91f64.to_radians()]);
    assert_eq!(fields.aa_rad, vec![20f64.to_radians()]);
}

#[test]
fn test_end_mode_with_two_column_position() {
    let fields = select_fields(&two_column_end_path(), SelectionMode::End).unwrap();
    assert_eq!(fields.radius, vec![100.0]);
    assert_eq!(fields.lat_deg, vec![5.0]);
    assert!(fields.lon_deg.is_empty());
    assert_eq!(fields.za_rad.len(), 1);
    assert!(fields.aa_rad.is_empty());
}

#[test]
fn test_start_mode() {
    let fields = select_fields(&antimeridian_path(), SelectionMode::Start).unwrap();
    assert_eq!(fields.radius, vec![70e3]);
    assert_eq!(fields.lon_deg, vec![-175.0]);
}

#[test]
fn test_one_dimensional_record() {
    let fields = select_fields(&one_dimensional_path(), SelectionMode::All).unwrap();
    assert_eq!(fields.radius.len(), 3);
    assert!(fields.lat_deg.is_empty() && fields.lon_deg.is_empty());
    assert_eq!(fields.za_rad.len(), 3);
    assert!(fields.aa_rad.is_empty());
}

#[test]
fn test_empty_record_selects_nothing() {
    let record = PathRecord::default();
    for mode in ["all", "start", "end", "low"] {
        let fields = select_fields(&record, mode.parse().unwrap()).unwrap();
        assert!(fields.is_empty(), "mode {}", mode);
    }
}

#[test]
fn test_unknown_mode_is_rejected() {
    let err = "lowest".parse::<SelectionMode>().unwrap_err();
    assert!(matches!(err, PpathError::InvalidArgument { .. }));
    assert!(err.to_string().contains("lowest"));
}

#[test]
fn test_lowest_with_mismatched_radius_fails() {
    let mut record = tied_minimum_path();
    record.r.push(1.0);
    assert!(matches!(
        select_fields(&record, SelectionMode::Lowest),
        Err(PpathError::ShapeMismatch(_))
    ));
}

// ============================================================================
// Merging lists of paths
// ============================================================================

#[test]
fn test_merge_end_points() {
    let paths = limb_path_list(3, 9);
    let merged = PathRecord::merge(&paths, SelectionMode::End).unwrap();
    assert_eq!(merged.pos.nrows(), 3);
    assert_eq!(merged.los.nrows(), 3);
    for (i, p) in paths.iter().enumerate() {
        assert_eq!(merged.pos.row(i).unwrap(), &p.end_pos[..]);
    }
    assert_eq!(merged.r, merged.pos.column(0).unwrap());
}

#[test]
fn test_merge_all_concatenates() {
    let paths = limb_path_list(2, 7);
    let merged = PathRecord::merge(&paths, SelectionMode::All).unwrap();
    assert_eq!(merged.nsamples(), 14);
    assert_eq!(merged.pos.row(7).unwrap(), paths[1].pos.row(0).unwrap());
}

#[test]
fn test_merge_lowest_with_ties() {
    let paths = vec![tied_minimum_path(), antimeridian_path()];
    let merged = PathRecord::merge(&paths, SelectionMode::Lowest).unwrap();
    // two tied rows from the first path, one from the second
    assert_eq!(merged.pos.column(0).unwrap(), vec![2.0, 2.0, 35e3]);
}

#[test]
fn test_merge_lowest_without_position_columns() {
    let paths = vec![los_only_path(), los_only_path()];
    let merged = PathRecord::merge(&paths, SelectionMode::Lowest).unwrap();
    assert_eq!(merged.pos.ncols(), 0);
    assert_eq!(merged.los.column(0).unwrap(), vec![91.0, 91.0]);
    assert!(merged.r.is_empty());
}

#[test]
fn test_merge_ragged_end_points_fails() {
    let paths = vec![antimeridian_path(), two_column_end_path()];
    assert!(matches!(
        PathRecord::merge(&paths, SelectionMode::End),
        Err(PpathError::ShapeMismatch(_))
    ));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_record_file_roundtrip() {
    let dir = output_dir();
    let path = write_record(dir.path(), "record.json", &antimeridian_path());
    let loaded = PathRecord::from_file(&path).unwrap();
    assert_eq!(loaded, antimeridian_path());
}

#[test]
fn test_record_missing_fields_default() {
    let record = PathRecord::from_json(r#"{"pos": [[1.0, 2.0, 3.0]], "r": [1.0]}"#).unwrap();
    assert_eq!(record.pos, SampleMatrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap());
    assert!(record.los.is_empty());
    assert!(record.end_pos.is_empty());
}

#[test]
fn test_ragged_matrix_rejected() {
    assert!(PathRecord::from_json(r#"{"pos": [[1.0, 2.0], [3.0]]}"#).is_err());
}
