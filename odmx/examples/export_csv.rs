//! Derive a renamed subset of a matrix and export it as CSV

use odmx::{DynamicStore, MatrixStore, Result};

fn main() -> Result<()> {
    let dir = std::env::temp_dir();
    let source_path = odmx::scratch_path(&dir);
    let subset_path = odmx::scratch_path(&dir);
    let csv_path = dir.join("odmx_example_export.csv");

    let mut matrix =
        MatrixStore::<i32>::create(&source_path, 4, &["am_peak", "pm_peak", "offpeak"])?;
    matrix.set_zone_ids(&[101, 102, 201, 202])?;
    for name in ["am_peak", "pm_peak", "offpeak"] {
        matrix.fill_core(name, |i, j| (i * 4 + j) as i32)?;
    }

    // Keep the peaks only, under fresh names
    let subset = matrix.copy_cores(&subset_path, &["am_peak", "pm_peak"], Some(&["am", "pm"]))?;
    println!("subset cores: {:?}", subset.core_names());
    subset.close(true)?;
    matrix.close(false)?;

    // A caller that does not know the stored type goes through DynamicStore
    let mut reloaded = DynamicStore::load(&subset_path)?;
    println!("stored type: {}", reloaded.data_type());
    reloaded.export(&csv_path, None)?;
    reloaded.close(false)?;

    println!("exported to {}", csv_path.display());
    for line in std::fs::read_to_string(&csv_path)?.lines().take(4) {
        println!("  {line}");
    }

    std::fs::remove_file(&source_path)?;
    std::fs::remove_file(&subset_path)?;
    std::fs::remove_file(&csv_path)?;
    Ok(())
}
