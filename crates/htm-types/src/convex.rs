use crate::error::SphericalError;
use crate::halfspace::Halfspace;
use crate::point::CartesianPoint;
use crate::trixel::TrixelState;

/// How a vertex sequence handed to [`Convex::from_hull_vertices`] should be
/// interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointOrdering {
    /// The caller guarantees the points already trace the hull boundary in
    /// order (as produced by an upstream convex-hull routine).
    Trusted,
    /// The points are in arbitrary order; re-derive the boundary ordering
    /// before building halfspaces.
    Safe,
}

/// A spherical convex region: the intersection of zero or more [`Halfspace`]s.
///
/// An empty halfspace list denotes the whole sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Convex {
    pub halfspaces: Vec<Halfspace>,
}

impl Convex {
    /// A convex region defined by a single halfspace (cap).
    pub fn from_halfspace(h: Halfspace) -> Self {
        Self {
            halfspaces: vec![h],
        }
    }

    /// Builds a convex region as the spherical convex hull of `points`.
    ///
    /// With [`PointOrdering::Safe`], `points` may be in arbitrary order; they
    /// are re-ordered into a hull boundary cycle via a tangent-plane projection
    /// and a planar convex hull (graham scan), mirroring the technique the
    /// teacher's `algorithm::convex_hull::graham` module uses in the plane.
    /// With [`PointOrdering::Trusted`], `points` is assumed to already trace
    /// the boundary in order; only consecutive duplicates are dropped.
    pub fn from_hull_vertices(
        points: &[CartesianPoint],
        ordering: PointOrdering,
    ) -> Result<Self, SphericalError> {
        let boundary = match ordering {
            PointOrdering::Safe => safe_hull_boundary(points)?,
            PointOrdering::Trusted => trusted_hull_boundary(points)?,
        };
        if boundary.len() < 3 {
            return Err(SphericalError::HullFailure(
                "fewer than 3 distinct hull vertices".to_string(),
            ));
        }
        let centroid = mean_direction(&boundary)?;
        let mut halfspaces = Vec::with_capacity(boundary.len());
        for i in 0..boundary.len() {
            let a = boundary[i];
            let b = boundary[(i + 1) % boundary.len()];
            let mut pole = a.cross(&b);
            let norm = pole.norm();
            if norm < 1e-15 {
                // `a` and `b` are (anti-)parallel: the edge degenerates to a
                // point, contributing no new bound.
                continue;
            }
            pole = (pole * (1.0 / norm)).normalized();
            if pole.dot(&centroid) < 0.0 {
                pole = pole * -1.0;
            }
            halfspaces.push(Halfspace::new(pole, 90.0));
        }
        if halfspaces.is_empty() {
            return Err(SphericalError::HullFailure(
                "hull boundary produced no bounding halfspaces".to_string(),
            ));
        }
        Ok(Self { halfspaces })
    }

    /// Removes halfspaces implied by the others.
    ///
    /// Exact linear-programming-based redundancy elimination is out of scope
    /// here (see `DESIGN.md`); this removes exact and near-duplicate poles
    /// (keeping the tightest angle) and drops trivial (whole-sphere) caps,
    /// which is the redundancy a hull-derived `Convex` actually exhibits.
    pub fn simplify(&mut self) {
        self.halfspaces.retain(|h| !h.is_trivial());
        let mut kept: Vec<Halfspace> = Vec::with_capacity(self.halfspaces.len());
        'outer: for h in self.halfspaces.drain(..) {
            for k in kept.iter_mut() {
                if k.pole.angle_to_deg(&h.pole) < 1e-9 {
                    if h.angle_deg < k.angle_deg {
                        *k = h;
                    }
                    continue 'outer;
                }
            }
            kept.push(h);
        }
        if kept.is_empty() {
            kept.push(Halfspace::full_sphere());
        }
        self.halfspaces = kept;
    }

    pub fn contains_point(&self, p: &CartesianPoint) -> bool {
        self.halfspaces.iter().all(|h| h.contains_point(p))
    }

    /// Classifies a spherical triangle against this convex region using the
    /// vertex-containment test the HTM literature's trixel markup uses:
    /// `Inner` if every vertex qualifies, `Outside` if none do and no convex
    /// corner falls inside the triangle either, `Partial` otherwise.
    pub fn classify_triangle(&self, tri: &[CartesianPoint; 3]) -> TrixelState {
        let inside = tri.iter().filter(|v| self.contains_point(v)).count();
        if inside == 3 {
            return TrixelState::Inner;
        }
        if inside > 0 {
            return TrixelState::Partial;
        }
        if self
            .halfspaces
            .iter()
            .any(|h| triangle_contains_point(tri, &h.pole))
        {
            return TrixelState::Partial;
        }
        TrixelState::Outside
    }
}

/// Winding-consistent point-in-spherical-triangle test: `p` is inside `tri`
/// (assumed positively oriented, as every `HtmId::to_triangle` result is) iff
/// it lies on the interior side of all three edge great circles.
pub fn triangle_contains_point(tri: &[CartesianPoint; 3], p: &CartesianPoint) -> bool {
    let edges = [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])];
    edges.iter().all(|(a, b)| a.cross(b).dot(p) >= -1e-12)
}

fn mean_direction(points: &[CartesianPoint]) -> Result<CartesianPoint, SphericalError> {
    let mut sum = CartesianPoint::new(0.0, 0.0, 0.0);
    for p in points {
        sum = CartesianPoint {
            x: sum.x + p.x,
            y: sum.y + p.y,
            z: sum.z + p.z,
        };
    }
    if sum.norm() < 1e-12 {
        return Err(SphericalError::HullFailure(
            "points have no well-defined mean direction (antipodal spread)".to_string(),
        ));
    }
    Ok(sum.normalized())
}

fn dedupe_consecutive(points: &[CartesianPoint]) -> Vec<CartesianPoint> {
    let mut out: Vec<CartesianPoint> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map(|q| q.angle_to_deg(&p) < 1e-9).unwrap_or(false) {
            continue;
        }
        out.push(p);
    }
    if out.len() > 1 && out[0].angle_to_deg(out.last().unwrap()) < 1e-9 {
        out.pop();
    }
    out
}

fn trusted_hull_boundary(points: &[CartesianPoint]) -> Result<Vec<CartesianPoint>, SphericalError> {
    Ok(dedupe_consecutive(points))
}

/// Re-derives the hull boundary by projecting onto the tangent plane at the
/// points' mean direction, then running a planar graham scan, the way
/// `Convex::from_hull_vertices` is documented to for [`PointOrdering::Safe`].
fn safe_hull_boundary(points: &[CartesianPoint]) -> Result<Vec<CartesianPoint>, SphericalError> {
    let deduped = dedupe_consecutive(points);
    if deduped.len() < 3 {
        return Err(SphericalError::HullFailure(
            "fewer than 3 distinct points".to_string(),
        ));
    }
    let center = mean_direction(&deduped)?;
    let (u, v) = tangent_basis(&center);

    let mut planar: Vec<(f64, f64, usize)> = deduped
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let d = p.dot(&center);
            if d <= 1e-9 {
                return Err(SphericalError::HullFailure(
                    "points span more than a hemisphere; cannot project".to_string(),
                ));
            }
            // Gnomonic projection: central projection onto the tangent plane.
            let px = p.dot(&u) / d;
            let py = p.dot(&v) / d;
            Ok((px, py, i))
        })
        .collect::<Result<_, _>>()?;

    let hull_idx = graham_scan(&mut planar);
    Ok(hull_idx.into_iter().map(|i| deduped[i]).collect())
}

fn tangent_basis(normal: &CartesianPoint) -> (CartesianPoint, CartesianPoint) {
    let helper = if normal.x.abs() < 0.9 {
        CartesianPoint::new(1.0, 0.0, 0.0)
    } else {
        CartesianPoint::new(0.0, 1.0, 0.0)
    };
    let u = normal.cross(&helper).normalized();
    let v = normal.cross(&u).normalized();
    (u, v)
}

/// Planar convex hull via graham scan, returning indices into the input in
/// CCW boundary order. Adapted from the classic
/// `algorithm::convex_hull::graham` for 2D points carrying a source index.
fn graham_scan(points: &mut [(f64, f64, usize)]) -> Vec<usize> {
    points.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then(a.0.partial_cmp(&b.0).unwrap()));
    let pivot = points[0];

    points[1..].sort_by(|a, b| {
        let oa = orient(pivot, *a, *b);
        match oa {
            o if o > 1e-12 => std::cmp::Ordering::Less,
            o if o < -1e-12 => std::cmp::Ordering::Greater,
            _ => {
                let da = (a.0 - pivot.0).hypot(a.1 - pivot.1);
                let db = (b.0 - pivot.0).hypot(b.1 - pivot.1);
                da.partial_cmp(&db).unwrap()
            }
        }
    });

    let mut hull: Vec<(f64, f64, usize)> = Vec::with_capacity(points.len());
    for &p in points.iter() {
        while hull.len() >= 2 && orient(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 1e-12 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.into_iter().map(|(_, _, i)| i).collect()
}

fn orient(o: (f64, f64, usize), a: (f64, f64, usize), b: (f64, f64, usize)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lon: f64, lat: f64) -> CartesianPoint {
        CartesianPoint::from_lonlat_deg(lon, lat)
    }

    #[test]
    fn hull_of_small_square_contains_its_center() {
        let pts = [ll(-1.0, -1.0), ll(1.0, -1.0), ll(1.0, 1.0), ll(-1.0, 1.0)];
        let hull = Convex::from_hull_vertices(&pts, PointOrdering::Safe).unwrap();
        assert!(hull.contains_point(&ll(0.0, 0.0)));
        assert!(!hull.contains_point(&ll(90.0, 0.0)));
    }

    #[test]
    fn single_halfspace_is_a_valid_convex() {
        let h = Halfspace::new(CartesianPoint::new(0.0, 0.0, 1.0), 30.0);
        let c = Convex::from_halfspace(h);
        assert!(c.contains_point(&CartesianPoint::new(0.0, 0.0, 1.0)));
        assert!(!c.contains_point(&CartesianPoint::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn trusted_ordering_uses_input_order_directly() {
        // A pre-ordered boundary (already traces the hull, no reordering
        // needed) round-trips to the same halfspaces under either ordering.
        let pts = [ll(-1.0, -1.0), ll(1.0, -1.0), ll(1.0, 1.0), ll(-1.0, 1.0)];
        let trusted = Convex::from_hull_vertices(&pts, PointOrdering::Trusted).unwrap();
        assert!(trusted.contains_point(&ll(0.0, 0.0)));
        assert!(!trusted.contains_point(&ll(90.0, 0.0)));
    }

    #[test]
    fn too_few_points_is_hull_failure() {
        let pts = [ll(0.0, 0.0), ll(1.0, 0.0)];
        assert!(Convex::from_hull_vertices(&pts, PointOrdering::Safe).is_err());
    }

    #[test]
    fn simplify_drops_trivial_and_dedupes() {
        let mut c = Convex {
            halfspaces: vec![
                Halfspace::full_sphere(),
                Halfspace::new(CartesianPoint::new(0.0, 0.0, 1.0), 45.0),
                Halfspace::new(CartesianPoint::new(0.0, 0.0, 1.0), 30.0),
            ],
        };
        c.simplify();
        assert_eq!(c.halfspaces.len(), 1);
        assert!((c.halfspaces[0].angle_deg - 30.0).abs() < 1e-9);
    }
}
