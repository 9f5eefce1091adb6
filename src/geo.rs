//! Geodetic conventions shared by the grid generator and the Voronoi
//! analyzer: degree-based (lon, lat) coordinates, unit-sphere conversions
//! and the Earth-scale constants used to size rings.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of arc at Earth scale, in kilometers.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A point on the sphere in degrees, longitude in [-180, 180] and latitude
/// in [-90, 90].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// Ordered sequence of grid points as produced by the generator and
/// consumed by the Voronoi analyzer.
pub type PointSet = Vec<GeoPoint>;

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Cartesian unit vector with x toward (lon 0, lat 0), z toward the
    /// north pole.
    pub fn to_unit_vector(&self) -> [f64; 3] {
        let lon = self.lon.to_radians();
        let lat = self.lat.to_radians();
        [lon.cos() * lat.cos(), lon.sin() * lat.cos(), lat.sin()]
    }

    /// Inverse of [`GeoPoint::to_unit_vector`]; `v` must be a unit vector.
    pub fn from_unit_vector(v: &[f64; 3]) -> Self {
        Self {
            lon: v[1].atan2(v[0]).to_degrees(),
            lat: v[2].clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }
}

/// Brings a longitude that left [-180, 180] through a single rotation step
/// back into range. Values are never more than one revolution out.
pub fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Meters spanned by one degree of latitude at the given latitude, from the
/// series expansion of the WGS84 meridian arc.
pub fn meters_per_degree_lat(lat_deg: f64) -> f64 {
    let lat = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat).cos() + 1.175 * (4.0 * lat).cos()
}
