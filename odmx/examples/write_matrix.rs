//! Create a small demand matrix, populate it and read it back

use odmx::{MatrixStore, Result};

fn main() -> Result<()> {
    let path = odmx::scratch_path(std::env::temp_dir());
    println!("Creating matrix at {}", path.display());

    let zones = 100;
    let mut matrix = MatrixStore::<f64>::create(&path, zones, &["work", "school"])?;

    // External zone identifiers rarely start at zero
    let ids: Vec<i64> = (0..zones as i64).map(|z| 1000 + z).collect();
    matrix.set_zone_ids(&ids)?;

    matrix.fill_core("work", |i, j| ((i + 1) * (j + 1)) as f64)?;
    matrix.set_cell("school", 10, 20, 55.0)?;

    matrix.set_view(&["work"])?;
    let produced = matrix.row_marginal()?;
    let attracted = matrix.column_marginal()?;
    println!(
        "zone {} produces {} and attracts {} trips",
        matrix.zone_id(0),
        produced[0],
        attracted[0]
    );

    matrix.close(true)?;

    let reloaded = MatrixStore::<f64>::open(&path)?;
    println!(
        "reloaded {} zones x {} cores, school[10][20] = {}",
        reloaded.zones(),
        reloaded.cores(),
        reloaded.get_cell("school", 10, 20)?
    );
    reloaded.close(false)?;

    std::fs::remove_file(&path)?;
    Ok(())
}
