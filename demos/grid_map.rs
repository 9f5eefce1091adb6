use plotters::prelude::*;
use vorosphere::{gauss_grid, GridParameters};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let params = GridParameters {
        sigma: 20.0,
        beta: 3.0,
        phi_ini: 2.0,
        phi_max: 10.0,
        lat_0: 46.2,
        lon_0: 6.1,
        rings: 200,
        dense_antipole: true,
    };
    let grid = gauss_grid(&params)?;

    let filename = "grid_map.svg";
    let root = SVGBackend::new(filename, (1024, 512)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Centre at {:.2} deg latitude and {:.2} deg longitude with {} gridpoints",
                params.lat_0,
                params.lon_0,
                grid.len()
            ),
            ("sans-serif", 20),
        )
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(-180.0..180.0, -90.0..90.0)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(
        grid.iter()
            .map(|p| Circle::new((p.lon, p.lat), 1, BLACK.filled())),
    )?;

    root.present()?;
    println!("Example output saved to {}", filename);
    Ok(())
}
