//! # vorosphere
//!
//! `vorosphere` generates latitude/longitude point grids on a sphere with
//! Gaussian-shaped point density around a point of interest, and computes
//! the spherical Voronoi tessellation of such grids together with the true
//! surface area of every cell. The area weights make the grids directly
//! usable for integration in global scientific workflows (seismic source
//! grids, sensitivity kernels, sampling densities).
//!
//! ## Features
//!
//! - **Gaussian grids**: ring-based construction with spacing growing from
//!   `phi_ini` to `phi_max` under a tunable falloff, rotated to any center,
//!   optionally mirrored onto the antipode.
//! - **Spherical Voronoi cells**: exact tessellation via the convex-hull
//!   dual, with cells as ordered spherical polygons.
//! - **Area weights**: per-cell spherical-excess integration, parallelized
//!   with `rayon`; cell areas always sum to the full sphere.
//!
//! ## Example
//!
//! ```
//! use vorosphere::{gauss_grid, GridParameters, SphericalVoronoi};
//!
//! let params = GridParameters {
//!     sigma: 12.0,
//!     beta: 2.0,
//!     phi_ini: 5.0,
//!     phi_max: 15.0,
//!     lat_0: 46.2,
//!     lon_0: 6.1,
//!     rings: 30,
//!     dense_antipole: true,
//! };
//! let grid = gauss_grid(&params)?;
//! let voronoi = SphericalVoronoi::build(&grid)?;
//! let table = voronoi.cell_areas();
//! assert_eq!(table.len(), grid.len());
//! # Ok::<(), vorosphere::Error>(())
//! ```
//!
//! See the `demos/` directory for map plotting, 3D cell plotting and JSON
//! export of the area table.
//!
//! ## Main Interface
//!
//! [`gauss_grid`] turns [`GridParameters`] into a point set;
//! [`SphericalVoronoi`] tessellates a point set and produces a
//! [`CellAreaTable`].

mod cell;
mod error;
pub mod geo;
mod grid;
mod hull;
mod rings;
mod vec3;
mod voronoi;

pub use cell::SphericalCell;
pub use error::Error;
pub use error::Result;
pub use geo::GeoPoint;
pub use geo::PointSet;
pub use grid::gauss_grid;
pub use grid::GridParameters;
pub use hull::ConvexHull;
pub use rings::RingProfile;
pub use voronoi::cell_areas;
pub use voronoi::CellAreaTable;
pub use voronoi::SphericalVoronoi;
