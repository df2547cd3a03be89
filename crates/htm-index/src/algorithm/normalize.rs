//! Output Normalizer: turns a [`ClassifiedTrixel`] into the
//! flat `(lo, hi, full, geomint)` row the index consumer stores per record.

use htm_types::HtmId;

use crate::algorithm::evaluator::ClassifiedTrixel;
use crate::algorithm::region::PolygonRegion;

/// One output record: the level-20 `(lo, hi)` range a trixel expands to,
/// whether it is fully inside the region, and (optionally) the clipped
/// intersection geometry for partial trixels.
#[derive(Clone, Debug)]
pub struct OutputRow {
    pub lo: HtmId,
    pub hi: HtmId,
    pub full: bool,
    pub geomint: Option<PolygonRegion>,
}

/// Extends a classified trixel to the maximum level and flattens it into an
/// [`OutputRow`]. `Inner` trixels always carry `full = true` and no
/// intersection geometry; `Partial` ones carry `full = false` and whatever
/// geometry the evaluator attached (present only when the caller asked to
/// keep intersections).
pub fn normalize(trixel: ClassifiedTrixel<PolygonRegion>) -> OutputRow {
    match trixel {
        ClassifiedTrixel::Inner(id) => {
            let (lo, hi) = id.extend(HtmId::MAX_LEVEL);
            OutputRow {
                lo,
                hi,
                full: true,
                geomint: None,
            }
        }
        ClassifiedTrixel::Partial(id, geomint) => {
            let (lo, hi) = id.extend(HtmId::MAX_LEVEL);
            OutputRow {
                lo,
                hi,
                full: false,
                geomint,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_trixel_normalizes_to_a_full_row() {
        let row = normalize(ClassifiedTrixel::Inner(HtmId(8)));
        assert!(row.full);
        assert!(row.geomint.is_none());
        assert_eq!(row.lo.level(), HtmId::MAX_LEVEL);
        assert_eq!(row.hi.level(), HtmId::MAX_LEVEL);
        assert!(row.lo.0 <= row.hi.0);
    }

    #[test]
    fn partial_trixel_normalizes_to_a_non_full_row() {
        let row = normalize(ClassifiedTrixel::Partial(HtmId(14248), None));
        assert!(!row.full);
        assert!(row.geomint.is_none());
        assert_eq!(row.lo.truncate(HtmId(14248).level()), HtmId(14248));
    }
}
