//! Delimited-text export keyed by external zone identifiers

mod common;

use common::{cleanup, temp_csv, temp_matrix};
use odmx::{MatrixError, MatrixStore};

#[test]
fn export_orders_rows_by_zone_pairs() {
    let path = temp_matrix("export_order");
    let output = temp_csv("export_order");

    let mut matrix = MatrixStore::<i64>::create(&path, 2, &["mat"]).unwrap();
    matrix.set_zone_ids(&[100, 200]).unwrap();
    matrix
        .fill_core("mat", |i, j| (i * 2 + j + 1) as i64)
        .unwrap();

    matrix.export(&output, None).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "row,column,mat",
            "100,100,1",
            "100,200,2",
            "200,100,3",
            "200,200,4",
        ]
    );

    cleanup(&path);
    cleanup(&output);
}

#[test]
fn export_multiple_cores_one_column_each() {
    let path = temp_matrix("export_multi");
    let output = temp_csv("export_multi");

    let mut matrix = MatrixStore::<f64>::create(&path, 2, &["am", "pm"]).unwrap();
    matrix.set_zone_ids(&[1, 2]).unwrap();
    matrix.fill_core("am", |i, j| (i + j) as f64).unwrap();
    matrix.fill_core("pm", |i, j| (10 * (i + j)) as f64).unwrap();

    matrix.export(&output, Some(&["am", "pm"])).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "row,column,am,pm");
    assert_eq!(lines[1], "1,1,0,0");
    assert_eq!(lines[2], "1,2,1,10");

    cleanup(&path);
    cleanup(&output);
}

#[test]
fn export_restores_previous_view() {
    let path = temp_matrix("export_restore");
    let output = temp_csv("export_restore");

    let mut matrix = MatrixStore::<f64>::create(&path, 2, &["a", "b"]).unwrap();

    // No view before export, none after
    matrix.export(&output, Some(&["b"])).unwrap();
    assert!(matrix.view_names().is_none());

    // An active view survives an export of a different selection
    matrix.set_view(&["a"]).unwrap();
    matrix.export(&output, Some(&["b"])).unwrap();
    assert_eq!(matrix.view_names().unwrap(), &["a"]);

    // And survives a failed export too
    assert!(matrix.export(&output, Some(&["nope"])).is_err());
    assert_eq!(matrix.view_names().unwrap(), &["a"]);

    cleanup(&path);
    cleanup(&output);
}

#[test]
fn export_rejects_unknown_format_and_core() {
    let path = temp_matrix("export_bad");

    let mut matrix = MatrixStore::<f64>::create(&path, 2, &["a"]).unwrap();

    let bad_target = std::env::temp_dir().join("odmx_export.parquet");
    match matrix.export(&bad_target, None) {
        Err(MatrixError::UnsupportedExportFormat(ext)) => assert_eq!(ext, "parquet"),
        other => panic!("expected unsupported-format error, got {other:?}"),
    }
    assert!(!bad_target.exists());

    let output = temp_csv("export_bad");
    assert!(matches!(
        matrix.export(&output, Some(&["nope"])),
        Err(MatrixError::UnknownCore(_))
    ));

    cleanup(&path);
    cleanup(&output);
}
