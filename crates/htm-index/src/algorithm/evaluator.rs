//! Trixel Evaluator: the adaptive hierarchical refinement at
//! the heart of the indexer. Implemented as an explicit frame stack rather
//! than a generator, since Rust has no first-class generators in stable
//! releases.

use htm_types::{CartesianPoint, HtmId};

use crate::algorithm::region::Region;
use crate::error::IndexError;

/// Tuning knobs for [`Evaluator`].
#[derive(Clone, Copy, Debug)]
pub struct EvalParams {
    pub max_level: u8,
    /// HTM levels descended per recursion step (`{1, 2, 3}`, typically `2`).
    pub delta_level: u8,
    /// Shrink factor applied only to the containment predicate's triangle.
    pub epsilon: f64,
    pub keep_intersections: bool,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            max_level: 20,
            delta_level: 2,
            epsilon: 1e-10,
            keep_intersections: false,
        }
    }
}

/// One trixel's classification as emitted by the evaluator: `Outside` never
/// survives to this point, so the variant carries only the two that do.
#[derive(Clone, Debug)]
pub enum ClassifiedTrixel<R> {
    Inner(HtmId),
    Partial(HtmId, Option<R>),
}

struct Frame<R> {
    region: R,
    candidates: std::vec::IntoIter<HtmId>,
}

/// A lazy, pull-based producer of [`ClassifiedTrixel`]s. Advancing the
/// iterator advances the deepest active frame, pushing a new one when a
/// partial trixel needs to recurse and popping when a frame's candidates are
/// exhausted, keeping memory proportional to recursion depth rather than
/// candidate count.
pub struct Evaluator<R> {
    params: EvalParams,
    stack: Vec<Frame<R>>,
}

impl<R: Region + Clone> Evaluator<R> {
    pub fn new(region: R, candidates: Vec<HtmId>, params: EvalParams) -> Self {
        Self {
            params,
            stack: vec![Frame {
                region,
                candidates: candidates.into_iter(),
            }],
        }
    }
}

impl<R: Region + Clone> Iterator for Evaluator<R> {
    type Item = Result<ClassifiedTrixel<R>, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = loop {
                let frame = self.stack.last_mut()?;
                match frame.candidates.next() {
                    Some(id) => break id,
                    None => {
                        self.stack.pop();
                        if self.stack.is_empty() {
                            return None;
                        }
                    }
                }
            };

            let tri = id.to_triangle();
            let shrunk = shrink_triangle(&tri, self.params.epsilon);

            let frame = self.stack.last().expect("just matched above");
            if frame.region.contains(&shrunk) {
                return Some(Ok(ClassifiedTrixel::Inner(id)));
            }

            let clipped = frame.region.intersection(&tri);
            let clipped = match clipped {
                Some(g) if !g.is_empty() => g,
                _ => continue,
            };

            let level = id.level();
            if level >= self.params.max_level {
                log::trace!("trixel {} partial at max level {}", id.0, level);
                let geomint = if self.params.keep_intersections {
                    Some(clipped)
                } else {
                    None
                };
                return Some(Ok(ClassifiedTrixel::Partial(id, geomint)));
            }

            let next_level = (level + self.params.delta_level).min(self.params.max_level);
            let (lo, hi) = id.extend(next_level);
            log::debug!(
                "subdividing trixel {} (level {}) into level {} children {}..={}",
                id.0,
                level,
                next_level,
                lo.0,
                hi.0
            );
            let children: Vec<HtmId> = (lo.0..=hi.0).map(HtmId::new).collect();
            self.stack.push(Frame {
                region: clipped,
                candidates: children.into_iter(),
            });
        }
    }
}

/// Moves each vertex toward the triangle's (unnormalized) centroid by
/// `epsilon`, then renormalizes onto S². Applied only ahead of the
/// containment predicate — intersection and output always
/// use the true triangle.
fn shrink_triangle(tri: &[CartesianPoint; 3], epsilon: f64) -> [CartesianPoint; 3] {
    if epsilon <= 0.0 {
        return *tri;
    }
    let centroid = CartesianPoint {
        x: (tri[0].x + tri[1].x + tri[2].x) / 3.0,
        y: (tri[0].y + tri[1].y + tri[2].y) / 3.0,
        z: (tri[0].z + tri[1].z + tri[2].z) / 3.0,
    };
    let mut out = *tri;
    for v in out.iter_mut() {
        let shifted = CartesianPoint {
            x: v.x - epsilon * (v.x - centroid.x),
            y: v.y - epsilon * (v.y - centroid.y),
            z: v.z - epsilon * (v.z - centroid.z),
        };
        *v = shifted.normalized();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::region::PolygonRegion;
    use geo_types::{polygon, Geometry};

    fn region_from(poly: geo_types::Polygon<f64>) -> PolygonRegion {
        let geom: Geometry<f64> = poly.into();
        PolygonRegion::from_geometry(&geom).unwrap()
    }

    #[test]
    fn trivial_trixel_equal_region_is_a_single_inner_record() {
        let tri = HtmId::new(8).to_triangle();
        let poly = polygon![
            (x: tri[0].ra_deg(), y: tri[0].dec_deg()),
            (x: tri[1].ra_deg(), y: tri[1].dec_deg()),
            (x: tri[2].ra_deg(), y: tri[2].dec_deg()),
            (x: tri[0].ra_deg(), y: tri[0].dec_deg()),
        ];
        let region = region_from(poly);
        let eval = Evaluator::new(
            region,
            vec![HtmId::new(8)],
            EvalParams {
                max_level: 1,
                ..Default::default()
            },
        );
        let results: Vec<_> = eval.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], ClassifiedTrixel::Inner(id) if id == HtmId::new(8)));
    }

    #[test]
    fn full_sphere_region_classifies_every_seed_as_inner() {
        let poly = polygon![
            (x: -179.0, y: -89.0),
            (x: 179.0, y: -89.0),
            (x: 179.0, y: 89.0),
            (x: -179.0, y: 89.0),
            (x: -179.0, y: -89.0),
        ];
        let region = region_from(poly);
        let seeds: Vec<HtmId> = (8..=15).map(HtmId::new).collect();
        let eval = Evaluator::new(
            region,
            seeds.clone(),
            EvalParams {
                max_level: 0,
                ..Default::default()
            },
        );
        let results: Vec<_> = eval.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(results.len(), seeds.len());
        assert!(results
            .iter()
            .all(|r| matches!(r, ClassifiedTrixel::Inner(_))));
    }
}
