//! Spherical Voronoi tessellation and cell surface areas.
//!
//! The diagram is the dual of the convex hull of the generator points:
//! every hull facet is a Delaunay triangle whose circumcenter direction is
//! a Voronoi vertex, and the cell of a generator is the fan of
//! circumcenters of its incident facets, ordered around the generator.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::cell::SphericalCell;
use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::hull::ConvexHull;
use crate::vec3::{cross, dot, norm, normalize, sub};

/// Chord distance below which two input points are treated as coincident.
const COINCIDENT_EPS: f64 = 1e-10;

/// Chord distance below which two circumcenters collapse into one cell
/// vertex. Cospherical facet fans (four or more generators on one circle)
/// produce such near-duplicates by construction.
const MERGE_EPS: f64 = 1e-7;

/// Spherical Voronoi diagram of a point set covering the whole sphere.
pub struct SphericalVoronoi {
    points: Vec<[f64; 3]>,
    cells: Vec<SphericalCell>,
}

/// Per-point output of the area computation: coordinates in the diagram's
/// ordering with the matching cell surface area in steradians.
#[derive(Debug, Clone)]
pub struct CellAreaTable {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub areas: Vec<f64>,
}

impl CellAreaTable {
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Sum of all cell areas; equals the full sphere surface of 4 pi up to
    /// the numerical tolerance of the tessellation.
    pub fn total_area(&self) -> f64 {
        self.areas.iter().sum()
    }
}

impl SphericalVoronoi {
    /// Builds the diagram for points given as (lon, lat) degrees.
    pub fn build(points: &[GeoPoint]) -> Result<Self> {
        Self::from_unit_points(points.iter().map(GeoPoint::to_unit_vector).collect())
    }

    /// Builds the diagram for points given as vectors, which are
    /// normalized onto the unit sphere first.
    ///
    /// Fails with [`Error::DegenerateInput`] when two points coincide or
    /// the set has fewer than 4 non-coplanar points.
    pub fn from_unit_points(points: Vec<[f64; 3]>) -> Result<Self> {
        let mut unit = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            let len = norm(p);
            if !len.is_finite() || len == 0.0 {
                return Err(Error::DegenerateInput {
                    reason: format!("point {i} is not a usable direction"),
                });
            }
            unit.push(normalize(p));
        }

        if let Some((i, j)) = find_coincident_pair(&unit) {
            return Err(Error::DegenerateInput {
                reason: format!("points {i} and {j} coincide"),
            });
        }

        let hull = ConvexHull::build(&unit)?;
        let cells = assemble_cells(&unit, &hull)?;

        Ok(Self {
            points: unit,
            cells,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The cells, indexed like the input points.
    pub fn cells(&self) -> &[SphericalCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&SphericalCell> {
        self.cells.get(index)
    }

    /// Computes the surface area of every cell.
    ///
    /// Cells are independent, so the integration runs as a parallel loop
    /// with per-index output writes; the result is identical to the
    /// sequential evaluation. Progress is logged every 1000 cells.
    pub fn cell_areas(&self) -> CellAreaTable {
        let total = self.cells.len();
        let done = AtomicUsize::new(0);

        let areas: Vec<f64> = self
            .cells
            .par_iter()
            .map(|cell| {
                let area = cell.area();
                let count = done.fetch_add(1, Ordering::Relaxed) + 1;
                if count % 1000 == 0 {
                    debug!("{count} of {total} voronoi cell surface areas calculated");
                }
                area
            })
            .collect();

        let mut lons = Vec::with_capacity(total);
        let mut lats = Vec::with_capacity(total);
        for cell in &self.cells {
            let p = GeoPoint::from_unit_vector(&cell.generator());
            lons.push(p.lon);
            lats.push(p.lat);
        }

        info!("all {total} voronoi cell surface areas calculated");
        CellAreaTable { lons, lats, areas }
    }
}

/// Convenience wrapper: tessellate and integrate in one call.
pub fn cell_areas(points: &[GeoPoint]) -> Result<CellAreaTable> {
    Ok(SphericalVoronoi::build(points)?.cell_areas())
}

/// Scans for a pair of coincident points. Points are sorted by x so only
/// neighborhoods within the tolerance window need full distance checks.
fn find_coincident_pair(points: &[[f64; 3]]) -> Option<(usize, usize)> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        points[i][0]
            .total_cmp(&points[j][0])
            .then(points[i][1].total_cmp(&points[j][1]))
            .then(points[i][2].total_cmp(&points[j][2]))
    });

    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if points[j][0] - points[i][0] > COINCIDENT_EPS {
                break;
            }
            if norm(&sub(&points[j], &points[i])) < COINCIDENT_EPS {
                return Some((i.min(j), i.max(j)));
            }
        }
    }
    None
}

/// Builds every generator's cell from the hull facets incident to it.
fn assemble_cells(points: &[[f64; 3]], hull: &ConvexHull) -> Result<Vec<SphericalCell>> {
    let faces = hull.faces();

    // Circumcenter direction of each facet, from the unperturbed points.
    // Outward winding makes the facet-plane normal the circumcenter on the
    // generator side of the sphere.
    let circumcenters: Vec<[f64; 3]> = faces
        .iter()
        .map(|&[i, j, k]| {
            normalize(&cross(
                &sub(&points[j], &points[i]),
                &sub(&points[k], &points[i]),
            ))
        })
        .collect();

    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for (face_idx, face) in faces.iter().enumerate() {
        for &v in face {
            incident[v].push(face_idx);
        }
    }

    let mut cells = Vec::with_capacity(points.len());
    for (i, facet_ids) in incident.iter().enumerate() {
        if facet_ids.len() < 3 {
            return Err(Error::DegenerateInput {
                reason: format!("point {i} is not a vertex of the tessellation"),
            });
        }
        let generator = points[i];
        let vertices = ordered_cell_vertices(&generator, facet_ids, &circumcenters);
        cells.push(SphericalCell::new(i, generator, vertices));
    }
    Ok(cells)
}

/// Orders a cell's circumcenters counter-clockwise around the generator
/// (angle in the tangent plane) and merges near-duplicates.
fn ordered_cell_vertices(
    generator: &[f64; 3],
    facet_ids: &[usize],
    circumcenters: &[[f64; 3]],
) -> Vec<[f64; 3]> {
    // Right-handed tangent basis (u, v, generator): ascending angle is
    // counter-clockwise as seen from outside the sphere.
    let pick = if generator[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let u = normalize(&cross(generator, &pick));
    let v = cross(generator, &u);

    let mut angled: Vec<(f64, [f64; 3])> = facet_ids
        .iter()
        .map(|&f| {
            let w = circumcenters[f];
            (dot(&w, &v).atan2(dot(&w, &u)), w)
        })
        .collect();
    angled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut vertices: Vec<[f64; 3]> = Vec::with_capacity(angled.len());
    for (_, w) in angled {
        if let Some(last) = vertices.last() {
            if norm(&sub(&w, last)) < MERGE_EPS {
                continue;
            }
        }
        vertices.push(w);
    }
    if vertices.len() > 1 {
        let first = vertices[0];
        let last = vertices[vertices.len() - 1];
        if norm(&sub(&last, &first)) < MERGE_EPS {
            vertices.pop();
        }
    }
    vertices
}
