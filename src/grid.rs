//! Gaussian grid generation.
//!
//! Builds a point set on the sphere whose density follows a Gaussian
//! falloff away from a point of interest: rings of points around a dense
//! pole, spaced by the [`RingProfile`](crate::RingProfile), then rotated so
//! the dense region is centered at the requested (lat, lon).

use std::f64::consts::PI;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::{self, GeoPoint, PointSet};
use crate::rings::RingProfile;

/// Parameters of a Gaussian grid.
///
/// `sigma` (greater than 2) sets the size of the densely sampled area and
/// `beta` the steepness of the falloff toward the maximum spacing. Spacing
/// runs from `phi_ini` to `phi_max` degrees, both at most 90 with
/// `phi_ini <= phi_max`. The dense region is centered at (`lat_0`, `lon_0`);
/// with `dense_antipole` set, the antipode is sampled densely as well.
#[derive(Debug, Clone, Copy)]
pub struct GridParameters {
    /// Standard deviation of the falloff; the extent of the dense area.
    pub sigma: f64,
    /// Steepness of the transition from `phi_ini` to `phi_max`.
    pub beta: f64,
    /// Initial spacing between grid points, in degrees.
    pub phi_ini: f64,
    /// Maximum spacing between grid points, in degrees.
    pub phi_max: f64,
    /// Latitude of the point of interest, -90 to 90 degrees.
    pub lat_0: f64,
    /// Longitude of the point of interest, -180 to 180 degrees.
    pub lon_0: f64,
    /// Number of latitudes at which the spacing profile is sampled.
    pub rings: usize,
    /// Mirror the dense region onto the opposite hemisphere.
    pub dense_antipole: bool,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            sigma: 20.0,
            beta: 3.0,
            phi_ini: 2.0,
            phi_max: 10.0,
            lat_0: 0.0,
            lon_0: 0.0,
            rings: 200,
            dense_antipole: true,
        }
    }
}

impl GridParameters {
    /// Checks ranges and mutual consistency. Runs before any computation;
    /// a failure leaves no partial result behind.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat_0) {
            return Err(Error::InvalidParameter {
                name: "lat_0",
                message: format!("{} is outside -90 to 90 degrees", self.lat_0),
            });
        }
        if !(-180.0..=180.0).contains(&self.lon_0) {
            return Err(Error::InvalidParameter {
                name: "lon_0",
                message: format!("{} is outside -180 to 180 degrees", self.lon_0),
            });
        }
        if self.phi_ini > 90.0 {
            return Err(Error::InvalidParameter {
                name: "phi_ini",
                message: format!("{} is larger than 90 degrees", self.phi_ini),
            });
        }
        if self.phi_max > 90.0 {
            return Err(Error::InvalidParameter {
                name: "phi_max",
                message: format!("{} is larger than 90 degrees", self.phi_max),
            });
        }
        if self.phi_ini > self.phi_max {
            return Err(Error::InvalidParameter {
                name: "phi_ini",
                message: format!(
                    "{} is larger than phi_max ({})",
                    self.phi_ini, self.phi_max
                ),
            });
        }
        if self.rings < 2 {
            return Err(Error::InvalidParameter {
                name: "rings",
                message: format!("{} rings cannot form a spacing profile", self.rings),
            });
        }
        Ok(())
    }
}

/// Generates the Gaussian grid for the given parameters.
///
/// The returned points are (lon, lat) pairs in degrees, one per grid point,
/// ordered pole first and then ring by ring. The computation is
/// deterministic: identical parameters always yield the identical point
/// list.
pub fn gauss_grid(params: &GridParameters) -> Result<PointSet> {
    params.validate()?;

    let profile = RingProfile::build(params);
    let radii = profile.radii();
    let counts = ring_point_counts(&profile);

    // Unrotated frame: one point at the dense pole plus evenly spaced
    // points on every ring except the last, shifted so the pole sits at
    // (-180, -90).
    let mut lons = vec![-180.0];
    let mut lats = vec![-90.0];
    for i in 0..radii.len() - 1 {
        if counts[i] == 0 {
            continue;
        }
        let step = 360.0 / counts[i] as f64;
        for j in 0..counts[i] {
            lons.push(j as f64 * step - 180.0);
            lats.push(radii[i] - 90.0);
        }
    }

    if params.dense_antipole {
        // Mirror construction for the opposite hemisphere, this time
        // including the last ring so the two halves meet at the equator
        // without doubling it.
        lons.push(-180.0);
        lats.push(90.0);
        for i in 0..radii.len() {
            if counts[i] == 0 {
                continue;
            }
            let step = 360.0 / counts[i] as f64;
            for j in 0..counts[i] {
                lons.push(j as f64 * step - 180.0);
                lats.push(90.0 - radii[i]);
            }
        }
    }

    let points = rotate_to_center(&lons, &lats, params);

    let (dphi_min, dphi_max) = profile.spacing_bounds();
    let degree_length = geo::meters_per_degree_lat(params.lat_0);
    info!("number of gridpoints: {}", points.len());
    info!(
        "minimum dx: {:.3} m ({:.3} deg)",
        dphi_min * degree_length,
        dphi_min
    );
    info!(
        "maximum dx: {:.3} m ({:.3} deg)",
        dphi_max * degree_length,
        dphi_max
    );

    Ok(points)
}

/// Number of points on each ring, chosen so the spacing along the ring
/// approximates the radial spacing between rings.
fn ring_point_counts(profile: &RingProfile) -> Vec<usize> {
    profile
        .radii()
        .iter()
        .zip(profile.spacings())
        .map(|(&phi, &dphi)| {
            let circumference =
                (2.0 * PI * geo::EARTH_RADIUS_KM * phi.to_radians().sin()).abs();
            let count = (circumference / (dphi * geo::KM_PER_DEGREE)).round();
            if count.is_finite() && count >= 1.0 {
                count as usize
            } else {
                // A very small ring paired with coarse spacing can round to
                // zero points; emit nothing for it rather than aborting.
                debug!("ring at {phi:.3} deg rounds to zero points, skipped");
                0
            }
        })
        .collect()
}

/// Rotates the unrotated grid so the dense pole lands on (lat_0, lon_0).
///
/// The rotation composes a turn of 90 deg - lat_0 about the y-axis with a
/// turn of lon_0 about the z-axis. Longitudes are recovered through atan2
/// plus the z-turn, wrapped once back into [-180, 180].
fn rotate_to_center(lons: &[f64], lats: &[f64], params: &GridParameters) -> PointSet {
    // The single-pole construction leaves the dense pole at latitude -90;
    // negating both angles moves it to +90, the frame the antipole
    // construction is already in.
    let flip = if params.dense_antipole { 1.0 } else { -1.0 };

    let theta_rot = (90.0 - params.lat_0).to_radians();
    let phi_rot = params.lon_0.to_radians();
    let (ct, st) = (theta_rot.cos(), theta_rot.sin());
    let (cp, sp) = (phi_rot.cos(), phi_rot.sin());

    lons.iter()
        .zip(lats)
        .map(|(lon, lat)| {
            let lon_r = flip * lon.to_radians();
            let lat_r = flip * lat.to_radians();
            let x = lon_r.cos() * lat_r.cos();
            let y = lon_r.sin() * lat_r.cos();
            let z = lat_r.sin();

            let xn = ct * cp * x + ct * sp * y + st * z;
            let yn = -sp * x + cp * y;
            let zn = -st * cp * x - st * sp * y + ct * z;

            GeoPoint::new(
                geo::wrap_longitude((yn.atan2(xn) + phi_rot).to_degrees()),
                zn.clamp(-1.0, 1.0).asin().to_degrees(),
            )
        })
        .collect()
}
