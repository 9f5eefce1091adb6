//! Convex hull of unit vectors.
//!
//! The spherical Voronoi diagram is read off the 3D convex hull of the
//! generator points: hull facets are Delaunay triangles on the sphere and
//! their circumcenter directions are the Voronoi vertices. The hull is
//! built once by beneath-beyond insertion and never mutated afterward.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::vec3::{cross, dot, norm, sub};

/// Tolerance for collinearity and coplanarity during seeding.
const DEGENERATE_EPS: f64 = 1e-9;

/// Visibility tolerance for the beneath-beyond insertion. Kept well below
/// the joggle magnitude so perturbed ties resolve deterministically.
const VISIBLE_EPS: f64 = 1e-12;

/// Radial joggle applied to break cospherical ties (rings of points share
/// a plane). The perturbed points only steer the facet choice; all
/// downstream geometry is evaluated on the unperturbed inputs, and the
/// Voronoi assembly merges the duplicate circumcenters that tie-broken
/// facet fans produce.
const JOGGLE: f64 = 1e-9;

/// Triangulated convex hull over a fixed point set.
pub struct ConvexHull {
    faces: Vec<[usize; 3]>,
}

impl ConvexHull {
    /// Builds the hull of the given points.
    ///
    /// Fails with [`Error::DegenerateInput`] when fewer than 4 points are
    /// given or when no four points span a tetrahedron.
    pub fn build(points: &[[f64; 3]]) -> Result<ConvexHull> {
        if points.len() < 4 {
            return Err(Error::DegenerateInput {
                reason: format!("need at least 4 points, got {}", points.len()),
            });
        }

        let jogged: Vec<[f64; 3]> = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let s = 1.0 + JOGGLE * index_noise(i);
                [p[0] * s, p[1] * s, p[2] * s]
            })
            .collect();

        let [a, b, c, d] = seed_tetrahedron(&jogged)?;
        let interior = [
            (jogged[a][0] + jogged[b][0] + jogged[c][0] + jogged[d][0]) / 4.0,
            (jogged[a][1] + jogged[b][1] + jogged[c][1] + jogged[d][1]) / 4.0,
            (jogged[a][2] + jogged[b][2] + jogged[c][2] + jogged[d][2]) / 4.0,
        ];

        let mut faces: Vec<[usize; 3]> = Vec::with_capacity(2 * points.len());
        let mut normals: Vec<[f64; 3]> = Vec::with_capacity(2 * points.len());
        for face in [[a, b, c], [a, b, d], [a, c, d], [b, c, d]] {
            let (face, normal) = orient_outward(face, &jogged, &interior);
            faces.push(face);
            normals.push(normal);
        }

        for p_idx in 0..jogged.len() {
            if p_idx == a || p_idx == b || p_idx == c || p_idx == d {
                continue;
            }
            insert_point(p_idx, &jogged, &interior, &mut faces, &mut normals);
        }

        Ok(ConvexHull { faces })
    }

    /// Hull facets as vertex index triples, wound counter-clockwise seen
    /// from outside.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// One beneath-beyond step: remove the faces visible from the new point
/// and fan new faces from the horizon edges to it.
fn insert_point(
    p_idx: usize,
    points: &[[f64; 3]],
    interior: &[f64; 3],
    faces: &mut Vec<[usize; 3]>,
    normals: &mut Vec<[f64; 3]>,
) {
    let p = points[p_idx];

    let visible: Vec<bool> = faces
        .iter()
        .zip(normals.iter())
        .map(|(face, normal)| dot(normal, &sub(&p, &points[face[0]])) > VISIBLE_EPS)
        .collect();
    if !visible.iter().any(|&v| v) {
        return;
    }

    // Horizon edges are the directed edges of visible faces whose reverse
    // belongs to a kept face.
    let mut visible_edges: HashSet<(usize, usize)> = HashSet::new();
    for (face, &vis) in faces.iter().zip(&visible) {
        if vis {
            visible_edges.insert((face[0], face[1]));
            visible_edges.insert((face[1], face[2]));
            visible_edges.insert((face[2], face[0]));
        }
    }
    let horizon: Vec<(usize, usize)> = visible_edges
        .iter()
        .filter(|(u, v)| !visible_edges.contains(&(*v, *u)))
        .copied()
        .collect();

    let mut kept_faces = Vec::with_capacity(faces.len());
    let mut kept_normals = Vec::with_capacity(normals.len());
    for ((face, normal), vis) in faces.iter().zip(normals.iter()).zip(&visible) {
        if !vis {
            kept_faces.push(*face);
            kept_normals.push(*normal);
        }
    }

    for (u, v) in horizon {
        let (face, normal) = orient_outward([u, v, p_idx], points, interior);
        kept_faces.push(face);
        kept_normals.push(normal);
    }

    *faces = kept_faces;
    *normals = kept_normals;
}

/// Winds a face counter-clockwise as seen from outside and returns its
/// outward unit normal. The interior reference must lie inside the hull.
/// Unit normals keep the visibility test a true distance comparison even
/// for sliver faces whose cross product is tiny.
fn orient_outward(
    face: [usize; 3],
    points: &[[f64; 3]],
    interior: &[f64; 3],
) -> ([usize; 3], [f64; 3]) {
    let [i, j, k] = face;
    let mut normal = cross(&sub(&points[j], &points[i]), &sub(&points[k], &points[i]));
    let len = norm(&normal);
    if len > 0.0 {
        normal = [normal[0] / len, normal[1] / len, normal[2] / len];
    }
    if dot(&normal, &sub(&points[i], interior)) < 0.0 {
        ([i, k, j], [-normal[0], -normal[1], -normal[2]])
    } else {
        (face, normal)
    }
}

/// Picks four points that span a tetrahedron, scanning in input order.
fn seed_tetrahedron(points: &[[f64; 3]]) -> Result<[usize; 4]> {
    let a = 0;

    let b = points
        .iter()
        .position(|p| norm(&sub(p, &points[a])) > DEGENERATE_EPS)
        .ok_or_else(|| Error::DegenerateInput {
            reason: "all points coincide".into(),
        })?;

    let ab = sub(&points[b], &points[a]);
    let c = points
        .iter()
        .position(|p| norm(&cross(&ab, &sub(p, &points[a]))) > DEGENERATE_EPS)
        .ok_or_else(|| Error::DegenerateInput {
            reason: "all points are collinear".into(),
        })?;

    let plane_normal = cross(&ab, &sub(&points[c], &points[a]));
    let d = points
        .iter()
        .position(|p| dot(&plane_normal, &sub(p, &points[a])).abs() > DEGENERATE_EPS)
        .ok_or_else(|| Error::DegenerateInput {
            reason: "points are coplanar".into(),
        })?;

    Ok([a, b, c, d])
}

/// Deterministic per-index value in [0, 1) used for the radial joggle.
fn index_noise(i: usize) -> f64 {
    let mut x = (i as u64) ^ 0x9e37_79b9_7f4a_7c15;
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::normalize;

    #[test]
    fn test_tetrahedron_hull() {
        let points = vec![
            normalize(&[1.0, 1.0, 1.0]),
            normalize(&[1.0, -1.0, -1.0]),
            normalize(&[-1.0, 1.0, -1.0]),
            normalize(&[-1.0, -1.0, 1.0]),
        ];
        let hull = ConvexHull::build(&points).unwrap();
        assert_eq!(hull.face_count(), 4);
    }

    #[test]
    fn test_octahedron_hull() {
        let points = vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let hull = ConvexHull::build(&points).unwrap();
        assert_eq!(hull.face_count(), 8);
        // Every point is a hull vertex.
        let mut used: Vec<bool> = vec![false; points.len()];
        for face in hull.faces() {
            for &v in face {
                used[v] = true;
            }
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn test_faces_wound_outward() {
        let points = vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let hull = ConvexHull::build(&points).unwrap();
        for face in hull.faces() {
            let normal = cross(
                &sub(&points[face[1]], &points[face[0]]),
                &sub(&points[face[2]], &points[face[0]]),
            );
            // Outward means away from the origin, which is interior here.
            assert!(dot(&normal, &points[face[0]]) > 0.0);
        }
    }

    #[test]
    fn test_euler_formula_on_random_cloud() {
        // V - E + F = 2; for a triangulated closed surface E = 3F / 2.
        let mut points = Vec::new();
        for i in 0..200 {
            let z = -1.0 + 2.0 * (i as f64 + 0.5) / 200.0;
            let theta = 2.4 * i as f64;
            let r = (1.0 - z * z).sqrt();
            points.push([r * theta.cos(), r * theta.sin(), z]);
        }
        let hull = ConvexHull::build(&points).unwrap();
        let f = hull.face_count();
        let mut vertices: HashSet<usize> = HashSet::new();
        for face in hull.faces() {
            vertices.extend(face.iter().copied());
        }
        let v = vertices.len();
        assert_eq!(f % 2, 0);
        let e = 3 * f / 2;
        assert_eq!(v as i64 - e as i64 + f as i64, 2);
    }

    #[test]
    fn test_coplanar_points_are_degenerate() {
        let points = vec![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ];
        assert!(matches!(
            ConvexHull::build(&points),
            Err(Error::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_too_few_points_are_degenerate() {
        let points = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(
            ConvexHull::build(&points),
            Err(Error::DegenerateInput { .. })
        ));
    }
}
