use thiserror::Error;

/// Errors reported by grid generation and Voronoi construction.
///
/// Both variants are fatal to the call that raised them; no partial result
/// is produced and nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// A grid parameter is out of range or inconsistent with another
    /// parameter. Raised by validation before any computation starts.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// The point set cannot bound a proper spherical Voronoi diagram
    /// (coincident points, or fewer than 4 non-coplanar points).
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
