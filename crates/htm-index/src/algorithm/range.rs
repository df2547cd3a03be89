//! Range utilities: user-callable wrappers around
//! `htm_types::HtmId`'s bit-shift primitives, with the argument validation
//! the library-internal methods skip via `debug_assert!`.

use htm_types::HtmId;

use crate::error::IndexError;

/// The ancestor of `id` at `level`. `level` must be `<= id.level()`.
pub fn truncate(id: HtmId, level: u8) -> Result<HtmId, IndexError> {
    if level > id.level() {
        return Err(IndexError::InvalidArgument(format!(
            "truncate level {level} exceeds id {}'s own level {}",
            id.0,
            id.level()
        )));
    }
    Ok(id.truncate(level))
}

/// The `(lo, hi)` range at `level` covering every descendant of `id`.
/// `level` must be `>= id.level()`.
pub fn extend(id: HtmId, level: u8) -> Result<(HtmId, HtmId), IndexError> {
    if level < id.level() {
        return Err(IndexError::InvalidArgument(format!(
            "extend level {level} is shallower than id {}'s own level {}",
            id.0,
            id.level()
        )));
    }
    if level > HtmId::MAX_LEVEL {
        return Err(IndexError::InvalidArgument(format!(
            "extend level {level} exceeds the maximum level {}",
            HtmId::MAX_LEVEL
        )));
    }
    Ok(id.extend(level))
}

/// The lazy sequence of ancestor ids at `level` covering the inclusive
/// `(lo, hi)` range: both ends must currently be at the same, deeper level,
/// and the range must not be inverted. Yields every id from
/// `truncate(lo, level)` to `truncate(hi, level)`, not just the two
/// endpoints — the caller consumes it row by row, the way the rest of this
/// crate's output is produced.
pub fn truncate_range(
    lo: HtmId,
    hi: HtmId,
    level: u8,
) -> Result<impl Iterator<Item = HtmId> + std::fmt::Debug, IndexError> {
    if lo.0 > hi.0 {
        return Err(IndexError::InvalidArgument(format!(
            "range ({}, {}) is inverted",
            lo.0, hi.0
        )));
    }
    if lo.level() != hi.level() {
        return Err(IndexError::InvalidArgument(format!(
            "range endpoints are at different levels ({} vs {})",
            lo.level(),
            hi.level()
        )));
    }
    let lo = truncate(lo, level)?;
    let hi = truncate(hi, level)?;
    Ok((lo.0..=hi.0).map(HtmId::new))
}
