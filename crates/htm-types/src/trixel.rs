use crate::convex::Convex;
use crate::point::CartesianPoint;

/// A trixel's classification relative to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrixelState {
    Inner,
    Partial,
    Outside,
}

/// The six vertices of the base octahedron, in the conventional HTM layout:
/// north and south poles plus four points on the equator.
const V_NORTH: CartesianPoint = CartesianPoint {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};
const V_SOUTH: CartesianPoint = CartesianPoint {
    x: 0.0,
    y: 0.0,
    z: -1.0,
};
const V0: CartesianPoint = CartesianPoint {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};
const V1: CartesianPoint = CartesianPoint {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};
const V2: CartesianPoint = CartesianPoint {
    x: -1.0,
    y: 0.0,
    z: 0.0,
};
const V3: CartesianPoint = CartesianPoint {
    x: 0.0,
    y: -1.0,
    z: 0.0,
};

/// The eight level-0 faces, indexed by `id - 8`.
const BASE_FACES: [[CartesianPoint; 3]; 8] = [
    [V0, V_SOUTH, V1], // id 8  (S0)
    [V1, V_SOUTH, V2], // id 9  (S1)
    [V2, V_SOUTH, V3], // id 10 (S2)
    [V3, V_SOUTH, V0], // id 11 (S3)
    [V0, V_NORTH, V3], // id 12 (N0)
    [V3, V_NORTH, V2], // id 13 (N1)
    [V2, V_NORTH, V1], // id 14 (N2)
    [V1, V_NORTH, V0], // id 15 (N3)
];

/// An HTM trixel identifier: a 64-bit integer whose leading `1` bit marks the
/// level-0 face (`8..=15`), followed by one base-4 digit per subdivision
/// level. Children of `id` are `id*4 + {0,1,2,3}`; the parent is `id / 4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HtmId(pub i64);

impl HtmId {
    pub const MIN_LEVEL: u8 = 0;
    pub const MAX_LEVEL: u8 = 20;

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The subdivision level this id encodes, where `0` is a base octahedron
    /// face (`8..=15`).
    pub fn level(&self) -> u8 {
        let bits = 64 - self.0.leading_zeros();
        ((bits - 4) / 2) as u8
    }

    /// The three Cartesian vertices of this trixel, in the order the base
    /// face table and subdivision rule produce (consistently positively
    /// oriented, as required by [`Convex::classify_triangle`] and
    /// [`crate::convex::triangle_contains_point`]).
    pub fn to_triangle(&self) -> [CartesianPoint; 3] {
        let level = self.level();
        let face_id = self.truncate(0).0;
        let mut tri = BASE_FACES[(face_id - 8) as usize];
        for d in (0..level).rev() {
            let digit = ((self.0 >> (2 * d)) & 0b11) as u8;
            tri = subdivide(&tri, digit);
        }
        tri
    }

    /// The ancestor of `self` at `level`, which must be `<= self.level()`.
    pub fn truncate(&self, level: u8) -> HtmId {
        debug_assert!(level <= self.level());
        let shift = 2 * (self.level() - level);
        HtmId(self.0 >> shift)
    }

    /// The contiguous `(lo, hi)` range at `level` (which must be
    /// `>= self.level()`) covering every descendant of `self`.
    pub fn extend(&self, level: u8) -> (HtmId, HtmId) {
        debug_assert!(level >= self.level());
        let shift = 2 * (level - self.level());
        let lo = self.0 << shift;
        let hi = lo | ((1i64 << shift) - 1);
        (HtmId(lo), HtmId(hi))
    }

    pub fn parent(&self) -> Option<HtmId> {
        if self.level() == 0 {
            None
        } else {
            Some(self.truncate(self.level() - 1))
        }
    }

    pub fn children(&self) -> [HtmId; 4] {
        let base = self.0 * 4;
        [
            HtmId(base),
            HtmId(base + 1),
            HtmId(base + 2),
            HtmId(base + 3),
        ]
    }
}

fn subdivide(tri: &[CartesianPoint; 3], digit: u8) -> [CartesianPoint; 3] {
    let [v0, v1, v2] = *tri;
    let w2 = v0.midpoint(&v1);
    let w0 = v1.midpoint(&v2);
    let w1 = v2.midpoint(&v0);
    match digit {
        0 => [v0, w2, w1],
        1 => [v1, w0, w2],
        2 => [v2, w1, w0],
        3 => [w0, w1, w2],
        _ => unreachable!("HTM child digit is a 2-bit value in 0..=3"),
    }
}

/// Iterative trixel-set refinement against a [`Convex`] region, used by the
/// seed generator to build a shallow over-approximating cover.
#[derive(Debug)]
pub struct Cover<'a> {
    convex: &'a Convex,
    level: u8,
    current: Vec<(HtmId, TrixelState)>,
}

impl<'a> Cover<'a> {
    pub fn new(convex: &'a Convex) -> Self {
        let current = (8..=15i64)
            .map(HtmId)
            .filter_map(|id| {
                let state = convex.classify_triangle(&id.to_triangle());
                (state != TrixelState::Outside).then_some((id, state))
            })
            .collect();
        Self {
            convex,
            level: 0,
            current,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Subdivides every trixel at the current level into its four children,
    /// keeping the set at a uniform level, which a seed cover must have to
    /// be usable as a starting candidate set. A trixel already `Inner` has every child `Inner` too, so
    /// those children are marked without a redundant halfspace test; only
    /// `Partial` children need reclassifying, and `Outside` ones are dropped.
    pub fn step(&mut self) {
        let mut next = Vec::with_capacity(self.current.len() * 4);
        for &(id, state) in &self.current {
            for child in id.children() {
                let child_state = if state == TrixelState::Inner {
                    TrixelState::Inner
                } else {
                    self.convex.classify_triangle(&child.to_triangle())
                };
                if child_state != TrixelState::Outside {
                    next.push((child, child_state));
                }
            }
        }
        self.current = next;
        self.level += 1;
    }

    /// The trixels at the current level. With `outer = true`, every retained
    /// (`Inner` or `Partial`) trixel is returned — the over-approximating
    /// cover. With `outer = false`, only the strictly `Inner` ones are.
    pub fn trixels(&self, outer: bool) -> Vec<HtmId> {
        self.current
            .iter()
            .filter(|(_, s)| outer || *s == TrixelState::Inner)
            .map(|(id, _)| *id)
            .collect()
    }
}
