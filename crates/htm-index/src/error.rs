use std::fmt;

/// Errors raised by the HTM indexing pipeline. None are recovered locally —
/// every variant aborts the current `geom_to_htm_chull`/`htm_index_create`
/// invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexError {
    /// A leaf sub-geometry was not a `Polygon` (or recursively polygonal
    /// collection). Carries the geometry variant name for diagnostics.
    UnsupportedGeometry { found: &'static str },
    /// The convex-hull generator could not build a hull from the region's
    /// vertices.
    HullFailure(String),
    /// An argument was outside the domain an operation is defined for
    /// (negative shrink epsilon, mismatched/inverted `truncate_range`
    /// levels, out-of-range `max_level`/`seed_level`).
    InvalidArgument(String),
    /// A host geometry predicate (`contains`/`intersection`/`is_empty`)
    /// failed. Surfaced unchanged from the underlying region implementation.
    HostPredicateFailure(String),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::UnsupportedGeometry { found } => {
                write!(f, "unsupported geometry type: {found}")
            }
            IndexError::HullFailure(msg) => write!(f, "convex hull failure: {msg}"),
            IndexError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            IndexError::HostPredicateFailure(msg) => {
                write!(f, "host predicate failure: {msg}")
            }
        }
    }
}

impl std::error::Error for IndexError {}

impl From<htm_types::SphericalError> for IndexError {
    fn from(e: htm_types::SphericalError) -> Self {
        match e {
            htm_types::SphericalError::HullFailure(msg) => IndexError::HullFailure(msg),
            htm_types::SphericalError::InvalidArgument(msg) => IndexError::InvalidArgument(msg),
        }
    }
}
