use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use vorosphere::{cell_areas, gauss_grid, Error, GeoPoint, GridParameters, SphericalVoronoi};

fn test_params() -> GridParameters {
    GridParameters {
        sigma: 10.0,
        beta: 2.0,
        phi_ini: 3.0,
        phi_max: 12.0,
        lat_0: 46.2,
        lon_0: 6.1,
        rings: 40,
        dense_antipole: true,
    }
}

#[test]
fn test_grid_to_areas_workflow() {
    let grid = gauss_grid(&test_params()).unwrap();
    assert!(grid.len() > 100);

    let voronoi = SphericalVoronoi::build(&grid).unwrap();
    assert_eq!(voronoi.cells().len(), grid.len());

    let table = voronoi.cell_areas();
    assert_eq!(table.len(), grid.len());
    assert!(table.areas.iter().all(|&a| a > 0.0));
    assert_relative_eq!(table.total_area(), 4.0 * PI, max_relative = 1e-3);
}

#[test]
fn test_workflow_is_deterministic() {
    let first = cell_areas(&gauss_grid(&test_params()).unwrap()).unwrap();
    let second = cell_areas(&gauss_grid(&test_params()).unwrap()).unwrap();

    assert_eq!(first.len(), second.len());
    for i in 0..first.len() {
        assert_eq!(first.lons[i], second.lons[i]);
        assert_eq!(first.lats[i], second.lats[i]);
        assert_eq!(first.areas[i], second.areas[i]);
    }
}

#[test]
fn test_output_points_are_the_input_points() {
    // The analyzer may reorder, but as an unordered set its output
    // coordinates must match the input grid exactly: no points created or
    // destroyed.
    let grid = gauss_grid(&test_params()).unwrap();
    let table = cell_areas(&grid).unwrap();
    assert_eq!(table.len(), grid.len());

    let outputs: Vec<[f64; 3]> = table
        .lons
        .iter()
        .zip(&table.lats)
        .map(|(&lon, &lat)| GeoPoint::new(lon, lat).to_unit_vector())
        .collect();

    for p in &grid {
        let v = p.to_unit_vector();
        let matched = outputs.iter().any(|w| {
            let dx = w[0] - v[0];
            let dy = w[1] - v[1];
            let dz = w[2] - v[2];
            (dx * dx + dy * dy + dz * dz).sqrt() < 1e-9
        });
        assert!(matched, "input point ({}, {}) missing from output", p.lon, p.lat);
    }
}

#[test]
fn test_octahedron_cells_have_known_area() {
    let points = vec![
        GeoPoint::new(0.0, 90.0),
        GeoPoint::new(0.0, -90.0),
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(90.0, 0.0),
        GeoPoint::new(180.0, 0.0),
        GeoPoint::new(-90.0, 0.0),
    ];
    let table = cell_areas(&points).unwrap();
    assert_eq!(table.len(), 6);
    for &area in &table.areas {
        assert_abs_diff_eq!(area, 4.0 * PI / 6.0, epsilon = 1e-6);
    }
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let bad_latitude = GridParameters {
        lat_0: 95.0,
        ..test_params()
    };
    assert!(matches!(
        gauss_grid(&bad_latitude),
        Err(Error::InvalidParameter { .. })
    ));

    let inverted_spacing = GridParameters {
        phi_ini: 50.0,
        phi_max: 30.0,
        ..test_params()
    };
    assert!(matches!(
        gauss_grid(&inverted_spacing),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn test_coincident_points_are_rejected() {
    let mut points = gauss_grid(&test_params()).unwrap();
    let first = points[0];
    points.push(first);
    assert!(matches!(
        SphericalVoronoi::build(&points),
        Err(Error::DegenerateInput { .. })
    ));
}
