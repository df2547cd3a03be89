//! Seed Generator: bounds a region and produces a shallow
//! starting trixel set for the evaluator to refine.

use htm_types::{CartesianPoint, Convex, Cover, Halfspace, HtmId, PointOrdering};

use crate::error::IndexError;

/// Default seed level used by `htm_index_create`'s implicit seed step.
pub const DEFAULT_SEED_LEVEL: u8 = 8;
/// Default seed level used by the explicit `geom_to_htm_chull` entry point.
pub const EXPLICIT_SEED_LEVEL: u8 = 10;
const SEED_LEVEL_MIN: u8 = 1;
const SEED_LEVEL_MAX: u8 = 16;

/// Coerces a caller-supplied seed level: `0` or anything
/// past `SEED_LEVEL_MAX` substitutes `default`.
pub fn coerce_seed_level(requested: u8, default: u8) -> u8 {
    if requested == 0 || requested > SEED_LEVEL_MAX {
        default
    } else {
        requested.max(SEED_LEVEL_MIN)
    }
}

/// The three ways offered to bound a region before seeding, plus
/// the full-globe escape hatch.
pub enum SeedMode {
    /// Run the spherical convex-hull generator directly on the region's
    /// vertex list. The list is the adapter's raw ring flattening, not a
    /// pre-ordered hull boundary, so this always goes through
    /// [`PointOrdering::Safe`] — a concave or arbitrarily-ordered input
    /// would otherwise produce halfspaces that cut into the region instead
    /// of bounding it.
    ConvexHullFromVertices(Vec<CartesianPoint>),
    /// Use a hull already computed by the host geometry library; its vertex
    /// order is not trusted (see `DESIGN.md`), so `Convex` is built
    /// with [`PointOrdering::Safe`].
    ExternalConvexHull(Vec<CartesianPoint>),
    /// Bound the region with a single enclosing cap, derived from the host's
    /// envelope center/radius. The `60×` multiplier on `radius_deg` is an
    /// observed upstream unit-conversion convention that must be
    /// reproduced bit-exactly (see `DESIGN.md`).
    EnclosingCap {
        center: CartesianPoint,
        radius_deg: f64,
    },
    /// Skip bounding altogether: seed with the eight base octahedron faces.
    FullGlobe,
}

impl SeedMode {
    fn to_convex(&self) -> Result<Convex, IndexError> {
        match self {
            SeedMode::ConvexHullFromVertices(pts) => {
                Ok(Convex::from_hull_vertices(pts, PointOrdering::Safe)?)
            }
            SeedMode::ExternalConvexHull(pts) => {
                Ok(Convex::from_hull_vertices(pts, PointOrdering::Safe)?)
            }
            SeedMode::EnclosingCap { center, radius_deg } => Ok(Convex::from_halfspace(
                Halfspace::new(*center, 60.0 * radius_deg),
            )),
            SeedMode::FullGlobe => Ok(Convex::from_halfspace(Halfspace::full_sphere())),
        }
    }
}

/// Converts a `seed_level` into the `HtmId::level()` depth [`seed_trixels`]
/// covers up to. `seed_level` counts refinement rounds from the eight base
/// faces, so it sits one ahead of `HtmId::level()`: `seed_level == 1` means
/// "use the base faces as seeded, without subdividing" (internal trixel
/// level 0), `seed_level == 2` means one round of subdivision (level 1),
/// and so on. Keeping this offset confined to the seed-level parameter
/// (rather than renumbering `HtmId::level()` itself) lets a region exactly
/// matching a base face seed — and stay — at its own granularity.
pub fn seed_target_depth(seed_level: u8) -> u8 {
    seed_level.saturating_sub(1)
}

/// Builds the seed trixel set: a `Convex` bound of the region, simplified,
/// then covered up to `seed_level` via [`Cover`].
pub fn seed_trixels(mode: &SeedMode, seed_level: u8) -> Result<Vec<HtmId>, IndexError> {
    if matches!(mode, SeedMode::FullGlobe) {
        return Ok((8..=15).map(HtmId::new).collect());
    }
    let mut convex = mode.to_convex()?;
    convex.simplify();
    let mut cover = Cover::new(&convex);
    let target_depth = seed_target_depth(seed_level);
    while cover.level() < target_depth {
        cover.step();
    }
    Ok(cover.trixels(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_vertices() -> Vec<CartesianPoint> {
        vec![
            CartesianPoint::from_lonlat_deg(-1.0, -1.0),
            CartesianPoint::from_lonlat_deg(1.0, -1.0),
            CartesianPoint::from_lonlat_deg(1.0, 1.0),
            CartesianPoint::from_lonlat_deg(-1.0, 1.0),
        ]
    }

    #[test]
    fn full_globe_seed_is_the_eight_base_faces() {
        let ids = seed_trixels(&SeedMode::FullGlobe, 5).unwrap();
        assert_eq!(ids.len(), 8);
        assert!(ids.iter().all(|id| id.level() == 0));
    }

    #[test]
    fn hull_seed_reaches_the_requested_level() {
        let ids = seed_trixels(
            &SeedMode::ConvexHullFromVertices(square_vertices()),
            4,
        )
        .unwrap();
        assert!(!ids.is_empty());
        assert!(ids.iter().all(|id| id.level() == 3));
    }

    #[test]
    fn seed_level_one_does_not_subdivide_past_the_base_faces() {
        let ids = seed_trixels(&SeedMode::ConvexHullFromVertices(square_vertices()), 1).unwrap();
        assert!(!ids.is_empty());
        assert!(ids.iter().all(|id| id.level() == 0));
    }

    #[test]
    fn seed_level_zero_coerces_to_default() {
        assert_eq!(coerce_seed_level(0, 8), 8);
        assert_eq!(coerce_seed_level(30, 10), 10);
        assert_eq!(coerce_seed_level(6, 8), 6);
    }

    #[test]
    fn enclosing_cap_applies_the_60x_multiplier() {
        let convex = SeedMode::EnclosingCap {
            center: CartesianPoint::new(0.0, 0.0, 1.0),
            radius_deg: 1.0,
        }
        .to_convex()
        .unwrap();
        assert_eq!(convex.halfspaces.len(), 1);
        assert!((convex.halfspaces[0].angle_deg - 60.0).abs() < 1e-9);
    }
}
