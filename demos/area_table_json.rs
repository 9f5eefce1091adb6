use std::f64::consts::PI;

use serde::Serialize;
use vorosphere::{cell_areas, gauss_grid, GridParameters};

#[derive(Serialize)]
struct CellRecord {
    lon: f64,
    lat: f64,
    area: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let params = GridParameters {
        sigma: 15.0,
        beta: 2.0,
        phi_ini: 3.0,
        phi_max: 12.0,
        lat_0: -21.1,
        lon_0: 55.5,
        rings: 60,
        dense_antipole: true,
    };
    let grid = gauss_grid(&params)?;
    let table = cell_areas(&grid)?;

    let records: Vec<CellRecord> = (0..table.len())
        .map(|i| CellRecord {
            lon: table.lons[i],
            lat: table.lats[i],
            area: table.areas[i],
        })
        .collect();

    let filename = "area_table.json";
    std::fs::write(filename, serde_json::to_string_pretty(&records)?)?;

    println!(
        "Wrote {} cells to {} (total area {:.6}, full sphere is {:.6})",
        records.len(),
        filename,
        table.total_area(),
        4.0 * PI
    );
    Ok(())
}
