//! Whole-file and subset copies

mod common;

use common::{cleanup, temp_matrix};
use odmx::{scratch_path, MatrixError, MatrixStore};

fn source_matrix(tag: &str) -> (MatrixStore<f64>, std::path::PathBuf) {
    let path = temp_matrix(tag);
    let mut matrix = MatrixStore::<f64>::create(&path, 4, &["a", "b", "c", "d"]).unwrap();
    matrix.set_zone_ids(&[11, 22, 33, 44]).unwrap();
    for (core, name) in ["a", "b", "c", "d"].iter().enumerate() {
        matrix
            .fill_core(name, |i, j| (core * 1000 + i * 10 + j) as f64)
            .unwrap();
    }
    (matrix, path)
}

#[test]
fn whole_file_copy_preserves_everything() {
    let (mut matrix, path) = source_matrix("copy_all_src");
    let target = temp_matrix("copy_all_dst");

    matrix.set_view(&["b", "c"]).unwrap();
    let copy = matrix.copy(&target).unwrap();

    assert_eq!(copy.zones(), 4);
    assert_eq!(copy.core_names(), matrix.core_names());
    assert_eq!(copy.zone_ids(), vec![11, 22, 33, 44]);
    // The source's view carries over to the new handle
    assert_eq!(copy.view_names().unwrap(), &["b", "c"]);
    for name in ["a", "b", "c", "d"] {
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(
                    copy.get_cell(name, i, j).unwrap(),
                    matrix.get_cell(name, i, j).unwrap()
                );
            }
        }
    }

    cleanup(&path);
    cleanup(&target);
}

#[test]
fn subset_copy_with_rename() {
    let (matrix, path) = source_matrix("copy_subset_src");
    let target = temp_matrix("copy_subset_dst");

    let copy = matrix
        .copy_cores(&target, &["b", "d"], Some(&["x", "y"]))
        .unwrap();

    assert_eq!(copy.core_names(), &["x", "y"]);
    assert_eq!(copy.zones(), 4);
    // Zone index is copied verbatim
    assert_eq!(copy.zone_ids(), matrix.zone_ids());
    // "x" equals source "b" and "y" equals source "d", cell for cell
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(
                copy.get_cell("x", i, j).unwrap(),
                matrix.get_cell("b", i, j).unwrap()
            );
            assert_eq!(
                copy.get_cell("y", i, j).unwrap(),
                matrix.get_cell("d", i, j).unwrap()
            );
        }
    }

    cleanup(&path);
    cleanup(&target);
}

#[test]
fn subset_copy_reorders_cores() {
    let (matrix, path) = source_matrix("copy_reorder_src");
    let target = temp_matrix("copy_reorder_dst");

    let copy = matrix.copy_cores(&target, &["d", "a"], None).unwrap();
    assert_eq!(copy.core_names(), &["d", "a"]);
    assert_eq!(
        copy.get_cell("d", 1, 2).unwrap(),
        matrix.get_cell("d", 1, 2).unwrap()
    );

    cleanup(&path);
    cleanup(&target);
}

#[test]
fn subset_copy_validates_before_writing() {
    let (matrix, path) = source_matrix("copy_invalid_src");
    let target = temp_matrix("copy_invalid_dst");

    assert!(matches!(
        matrix.copy_cores(&target, &["b", "nope"], None),
        Err(MatrixError::UnknownCore(_))
    ));
    assert!(matches!(
        matrix.copy_cores(&target, &["b", "d"], Some(&["x"])),
        Err(MatrixError::RenameLengthMismatch { cores: 2, names: 1 })
    ));
    // No target file came into existence
    assert!(!target.exists());

    cleanup(&path);
}

#[test]
fn scratch_paths_are_unique() {
    let dir = std::env::temp_dir();
    let first = scratch_path(&dir);
    let second = scratch_path(&dir);
    assert_ne!(first, second);
    assert!(first.starts_with(&dir));
}
