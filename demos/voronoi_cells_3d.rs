use plotters::prelude::*;
use vorosphere::{gauss_grid, GridParameters, SphericalVoronoi};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // A coarse grid keeps the cell polygons readable in the projection.
    let params = GridParameters {
        sigma: 12.0,
        beta: 2.0,
        phi_ini: 6.0,
        phi_max: 18.0,
        lat_0: 0.0,
        lon_0: 0.0,
        rings: 30,
        dense_antipole: true,
    };
    let grid = gauss_grid(&params)?;
    let voronoi = SphericalVoronoi::build(&grid)?;

    let filename = "voronoi_cells_3d.svg";
    let root = SVGBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Spherical Voronoi cells for {} gridpoints", grid.len()),
            ("sans-serif", 20),
        )
        .margin(20)
        .build_cartesian_3d(-1.2..1.2, -1.2..1.2, -1.2..1.2)?;

    chart.configure_axes().draw()?;

    // Draw the cells with transparency so the far side shows through.
    for cell in voronoi.cells() {
        let poly: Vec<(f64, f64, f64)> = cell
            .vertices()
            .iter()
            .map(|v| (v[0], v[1], v[2]))
            .collect();
        chart.draw_series(std::iter::once(Polygon::new(poly, BLUE.mix(0.1).filled())))?;
    }

    // Draw the generators as points.
    chart.draw_series(voronoi.cells().iter().map(|cell| {
        let g = cell.generator();
        Circle::new((g[0], g[1], g[2]), 2, RED.filled())
    }))?;

    root.present()?;
    println!("Example output saved to {}", filename);
    Ok(())
}
