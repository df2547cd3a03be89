use std::fmt;

/// Errors raised by the spherical-geometry and trixel-arithmetic primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum SphericalError {
    /// A hull could not be built from the given points (fewer than 3 distinct
    /// directions, or all points collinear through the origin).
    HullFailure(String),
    /// An argument was out of the domain the operation is defined for.
    InvalidArgument(String),
}

impl fmt::Display for SphericalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SphericalError::HullFailure(msg) => write!(f, "convex hull failure: {msg}"),
            SphericalError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for SphericalError {}
