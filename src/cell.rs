//! A single spherical Voronoi cell and its surface area.

use crate::vec3::arc_angle;

/// A Voronoi cell on the unit sphere: the region closer to its generator
/// than to any other, bounded by great-circle arcs between the ordered
/// vertices.
#[derive(Debug, Clone)]
pub struct SphericalCell {
    id: usize,
    generator: [f64; 3],
    vertices: Vec<[f64; 3]>,
}

impl SphericalCell {
    pub(crate) fn new(id: usize, generator: [f64; 3], vertices: Vec<[f64; 3]>) -> Self {
        Self {
            id,
            generator,
            vertices,
        }
    }

    /// Index of the generator point this cell belongs to.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The generator as a unit vector.
    pub fn generator(&self) -> [f64; 3] {
        self.generator
    }

    /// Cell vertices on the unit sphere, counter-clockwise as seen from
    /// outside.
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Surface area of the cell in steradians (sphere radius 1; scale by
    /// radius squared for other spheres).
    ///
    /// The polygon is fanned into spherical triangles from its first
    /// vertex; each triangle contributes its spherical excess. Voronoi
    /// cells are convex, so the fan covers the cell exactly.
    pub fn area(&self) -> f64 {
        let verts = &self.vertices;
        if verts.len() < 3 {
            return 0.0;
        }
        let mut total = 0.0;
        for i in 1..verts.len() - 1 {
            total += spherical_triangle_area(&verts[0], &verts[i], &verts[i + 1]);
        }
        total
    }
}

/// Area of the spherical triangle spanned by three unit vectors, via
/// L'Huilier's theorem on the three side arcs.
pub(crate) fn spherical_triangle_area(a: &[f64; 3], b: &[f64; 3], c: &[f64; 3]) -> f64 {
    let sa = arc_angle(b, c);
    let sb = arc_angle(a, c);
    let sc = arc_angle(a, b);
    let s = 0.5 * (sa + sb + sc);

    let t = (0.5 * s).tan()
        * (0.5 * (s - sa)).tan()
        * (0.5 * (s - sb)).tan()
        * (0.5 * (s - sc)).tan();
    // Rounding can push t a hair negative for needle triangles.
    4.0 * t.max(0.0).sqrt().atan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::normalize;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_octant_triangle_area() {
        // One eighth of the sphere.
        let area = spherical_triangle_area(
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
        );
        assert_relative_eq!(area, PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_triangle_has_zero_area() {
        let area = spherical_triangle_area(
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[0.0, 1.0, 0.0],
        );
        assert_relative_eq!(area, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_octahedron_cell_area() {
        // The cell of the north pole in the octahedron tessellation is the
        // spherical square through the four upper face circumcenters.
        let cell = SphericalCell::new(
            0,
            [0.0, 0.0, 1.0],
            vec![
                normalize(&[1.0, 1.0, 1.0]),
                normalize(&[-1.0, 1.0, 1.0]),
                normalize(&[-1.0, -1.0, 1.0]),
                normalize(&[1.0, -1.0, 1.0]),
            ],
        );
        assert_relative_eq!(cell.area(), 4.0 * PI / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_area_independent_of_fan_pivot() {
        let square = [
            normalize(&[1.0, 1.0, 1.0]),
            normalize(&[-1.0, 1.0, 1.0]),
            normalize(&[-1.0, -1.0, 1.0]),
            normalize(&[1.0, -1.0, 1.0]),
        ];
        let mut rotated = square.to_vec();
        rotated.rotate_left(2);
        let a = SphericalCell::new(0, [0.0, 0.0, 1.0], square.to_vec()).area();
        let b = SphericalCell::new(0, [0.0, 0.0, 1.0], rotated).area();
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_vertices_yield_zero() {
        let cell = SphericalCell::new(0, [0.0, 0.0, 1.0], vec![[1.0, 0.0, 0.0]]);
        assert_relative_eq!(cell.area(), 0.0);
    }
}
