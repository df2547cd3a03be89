//! Adaptive hierarchical refinement of polygonal regions on the sphere into
//! Hierarchical Triangular Mesh (HTM) trixel coverings.
//!
//! The two entry points, [`geom_to_htm_chull`] and [`htm_index_create`],
//! compose the pipeline: a [`geo_types::Geometry`] is flattened to vertices
//! (`algorithm::adapter`), bounded by a spherical convex hull and covered at
//! a shallow seed level (`algorithm::seed`), optionally refined trixel by
//! trixel against the region (`algorithm::evaluator`), and normalized to a
//! fixed output level (`algorithm::normalize`).
//!
//! # Examples
//!
//! ```
//! use geo_types::{polygon, Geometry};
//!
//! let region: Geometry<f64> = polygon![
//!     (x: -1.0, y: -1.0),
//!     (x: 1.0, y: -1.0),
//!     (x: 1.0, y: 1.0),
//!     (x: -1.0, y: 1.0),
//!     (x: -1.0, y: -1.0),
//! ]
//! .into();
//!
//! let rows = htm_index::htm_index_create(&region, 6, 1e-10, 4, false).unwrap();
//! assert!(!rows.is_empty());
//! ```

pub mod algorithm;
pub mod error;

pub use algorithm::adapter::vertices_of;
pub use algorithm::evaluator::{ClassifiedTrixel, EvalParams, Evaluator};
pub use algorithm::normalize::{normalize, OutputRow};
pub use algorithm::range::{extend, truncate, truncate_range};
pub use algorithm::region::{PolygonRegion, Region};
pub use algorithm::seed::{
    coerce_seed_level, seed_target_depth, seed_trixels, SeedMode, DEFAULT_SEED_LEVEL,
    EXPLICIT_SEED_LEVEL,
};
pub use error::IndexError;

use geo_types::Geometry;
use htm_types::HtmId;

/// Validates `max_level` against the trixel encoding's legal depth. Every
/// recursion and final `extend` call assumes `max_level` fits in this
/// range; letting a caller-supplied value past it through would let the
/// evaluator subdivide one level deeper than `HtmId::extend` can represent.
fn validate_max_level(max_level: u8) -> Result<(), IndexError> {
    if max_level < 1 || max_level > HtmId::MAX_LEVEL {
        return Err(IndexError::InvalidArgument(format!(
            "max_level {max_level} must be in 1..={}",
            HtmId::MAX_LEVEL
        )));
    }
    Ok(())
}

/// Seed-only covering: adapter → spherical-hull seed at `max_level` → hull
/// cover ranges at level 20. No recursive refinement, so every returned
/// range is an over-approximation, not a classification.
pub fn geom_to_htm_chull(
    region: &Geometry<f64>,
    max_level: u8,
) -> Result<Vec<(HtmId, HtmId)>, IndexError> {
    validate_max_level(max_level)?;
    let vertices = algorithm::adapter::vertices_of(region)?;
    let seed_level = coerce_seed_level(max_level, EXPLICIT_SEED_LEVEL);
    log::debug!("geom_to_htm_chull: seeding at level {seed_level}");
    let ids = seed_trixels(&SeedMode::ConvexHullFromVertices(vertices), seed_level)?;
    Ok(ids.into_iter().map(|id| id.extend(HtmId::MAX_LEVEL)).collect())
}

/// The full indexing pipeline: adapter → spherical-hull seed at
/// `seed_level` → evaluator (`ΔL = 2`) → output normalizer.
///
/// `seed_level` of `0` or greater than `16` is coerced to
/// [`DEFAULT_SEED_LEVEL`]. Fails with [`IndexError::InvalidArgument`] if
/// `epsilon < 0`, `max_level` is outside `1..=20`, or the (possibly
/// coerced) `seed_level` would seed deeper than `max_level` — every emitted
/// trixel must fall within `[seed_level, max_level]`.
///
/// The result is collected eagerly here for a simple, cache-friendly API;
/// [`Evaluator`] is available directly for callers that need the
/// streaming/pull-based form the core algorithm is built around.
pub fn htm_index_create(
    region: &Geometry<f64>,
    max_level: u8,
    epsilon: f64,
    seed_level: u8,
    keep_intersections: bool,
) -> Result<Vec<OutputRow>, IndexError> {
    validate_max_level(max_level)?;
    if epsilon < 0.0 {
        return Err(IndexError::InvalidArgument(format!(
            "shrink epsilon {epsilon} must be >= 0"
        )));
    }
    let vertices = algorithm::adapter::vertices_of(region)?;
    let seed_level = coerce_seed_level(seed_level, DEFAULT_SEED_LEVEL);
    let seed_depth = seed_target_depth(seed_level);
    if seed_depth > max_level {
        return Err(IndexError::InvalidArgument(format!(
            "seed_level {seed_level} (depth {seed_depth}) exceeds max_level {max_level}"
        )));
    }
    log::debug!("htm_index_create: seeding at level {seed_level}, max_level {max_level}");
    let seed_ids = seed_trixels(&SeedMode::ConvexHullFromVertices(vertices), seed_level)?;

    let polygon_region = PolygonRegion::from_geometry(region)?;
    let params = EvalParams {
        max_level,
        delta_level: 2,
        epsilon,
        keep_intersections,
    };
    Evaluator::new(polygon_region, seed_ids, params)
        .map(|r| r.map(normalize))
        .collect()
}
