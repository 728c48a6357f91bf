//! Single-source filters: one buffer combined with a scalar parameter.
//!
//! Shift amounts are validated against [`MAX_BYTE_SHIFT`] and rejected, never
//! clamped. Filters whose parameter makes them the identity copy the source
//! straight into the destination.
//!
//! [`MAX_BYTE_SHIFT`]: crate::MAX_BYTE_SHIFT

use crate::{
    FilterError, MAX_BYTE_SHIFT, STAGE_LEN, check_len, check_shift, from_unit, kernels, to_unit,
};

/// Map every byte through a 256-entry table.
#[inline(always)]
fn map_lut(src: &[u8], dst: &mut [u8], lut: &[u8; 256]) {
    for (&s, d) in src.iter().zip(dst.iter_mut()) {
        *d = lut[s as usize];
    }
}

#[inline(always)]
fn build_lut(f: impl Fn(u8) -> u8) -> [u8; 256] {
    core::array::from_fn(|i| f(i as u8))
}

/// `trunc(min(1, s/255 * c/255) * 255)`, shared by the two multiply filters.
#[inline(always)]
fn mult_unit(s: u8, c: u8) -> u8 {
    from_unit((to_unit(s) * to_unit(c)).min(1.0))
}

// ===========================================================================
// Kernel-backed filters
// ===========================================================================

/// `D = !S`
pub fn bit_negation(src: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    kernels::not(src, dst);
    Ok(())
}

/// `D = min(S + c, 255)`
pub fn add_byte(src: &[u8], dst: &mut [u8], c: u8) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if c == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    kernels::add_const(src, dst, c);
    Ok(())
}

/// `D = max(S - c, 0)`
pub fn sub_byte(src: &[u8], dst: &mut [u8], c: u8) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if c == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    kernels::sub_const(src, dst, c);
    Ok(())
}

/// `D = 255` where `S >= t`, else `0`.
///
/// `t == 0` fills the destination without reading the source.
pub fn binarize_using_threshold(src: &[u8], dst: &mut [u8], t: u8) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if t == 0 {
        dst.fill(0xFF);
        return Ok(());
    }
    kernels::threshold(src, dst, t);
    Ok(())
}

/// Clamp into `tmin..=tmax`.
///
/// The comparisons run in a fixed order, `S < tmin` first and `S > tmax`
/// second, so an inverted range (`tmin > tmax`) maps every byte below `tmin`
/// to `tmin` and everything else to `tmax`.
pub fn clip_to_range(src: &[u8], dst: &mut [u8], tmin: u8, tmax: u8) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if tmin == 0 && tmax == 255 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    if tmin <= tmax {
        kernels::clip(src, dst, tmin, tmax);
    } else {
        for (&s, d) in src.iter().zip(dst.iter_mut()) {
            *d = if s < tmin { tmin } else { tmax };
        }
    }
    Ok(())
}

// ===========================================================================
// Table-driven filters
// ===========================================================================

/// `D = min(S/2 + c, 255)` with integer halving.
pub fn add_byte_to_half(src: &[u8], dst: &mut [u8], c: u8) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    let lut = build_lut(|s| (s / 2).saturating_add(c));
    map_lut(src, dst, &lut);
    Ok(())
}

/// `D = trunc(S/255 * c/255 * 255)`, computed in the unit interval.
///
/// `c == 1` is treated as the identity and copies the source.
pub fn mult_by_byte(src: &[u8], dst: &mut [u8], c: u8) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if c == 1 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    let lut = build_lut(|s| mult_unit(s, c));
    map_lut(src, dst, &lut);
    Ok(())
}

/// `D = S >> n` for `n` in `0..=8`. A shift of 8 clears every byte.
pub fn shift_right(src: &[u8], dst: &mut [u8], n: u32) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    check_shift(n, MAX_BYTE_SHIFT)?;
    if n == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    let lut = build_lut(|s| (u32::from(s) >> n) as u8);
    map_lut(src, dst, &lut);
    Ok(())
}

/// `D = trunc((S >> n)/255 * c/255 * 255)` for `n` in `0..=8`.
pub fn shift_right_and_mult_by_byte(
    src: &[u8],
    dst: &mut [u8],
    n: u32,
    c: u8,
) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    check_shift(n, MAX_BYTE_SHIFT)?;
    if n == 0 && c == 1 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    let lut = build_lut(|s| mult_unit((u32::from(s) >> n) as u8, c));
    map_lut(src, dst, &lut);
    Ok(())
}

/// `D = min(S << n, 255)` for `n` in `0..=8`.
pub fn shift_left(src: &[u8], dst: &mut [u8], n: u32) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    check_shift(n, MAX_BYTE_SHIFT)?;
    if n == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    let lut = build_lut(|s| (u32::from(s) << n).min(255) as u8);
    map_lut(src, dst, &lut);
    Ok(())
}

/// `D = (S << n) mod 256` for `n` in `0..=8`. High bits fall off.
pub fn shift_left_byte(src: &[u8], dst: &mut [u8], n: u32) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    check_shift(n, MAX_BYTE_SHIFT)?;
    if n == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }
    let lut = build_lut(|s| (u32::from(s) << n) as u8);
    map_lut(src, dst, &lut);
    Ok(())
}

/// Linear contrast stretch from `cmin..cmax` onto `nmin..nmax`.
///
/// Works in the unit interval: `y = (nmax-nmin)/(cmax-cmin) * (S/255 -
/// cmin/255) + nmin/255`, clamped to `[0, 1]` and truncated back to a byte.
/// When `cmin == cmax` nothing is written and the call still succeeds.
pub fn normalize_linear(
    src: &[u8],
    dst: &mut [u8],
    cmin: i32,
    cmax: i32,
    nmin: i32,
    nmax: i32,
) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    if cmin == cmax {
        return Ok(());
    }
    let fcmin = cmin as f32 / 255.0;
    let fnmin = nmin as f32 / 255.0;
    let fnmax = nmax as f32 / 255.0;
    // Widened so bounds that collapse to one f32 still give a non-zero span
    let dc = (i64::from(cmax) - i64::from(cmin)) as f32 / 255.0;
    let factor = (fnmax - fnmin) / dc;
    let lut = build_lut(|s| from_unit((factor * (to_unit(s) - fcmin) + fnmin).min(1.0)));
    map_lut(src, dst, &lut);
    Ok(())
}

// ===========================================================================
// Enum dispatch
// ===========================================================================

/// A single-source filter and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteFilter {
    BitNegation,
    AddByte(u8),
    AddByteToHalf(u8),
    SubByte(u8),
    MultByByte(u8),
    ShiftRight(u32),
    ShiftRightAndMultByByte { shift: u32, factor: u8 },
    ShiftLeft(u32),
    ShiftLeftByte(u32),
    BinarizeUsingThreshold(u8),
    ClipToRange { min: u8, max: u8 },
    NormalizeLinear { cmin: i32, cmax: i32, nmin: i32, nmax: i32 },
}

impl ByteFilter {
    /// Run the filter, writing `dst`.
    pub fn apply(self, src: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
        match self {
            ByteFilter::BitNegation => bit_negation(src, dst),
            ByteFilter::AddByte(c) => add_byte(src, dst, c),
            ByteFilter::AddByteToHalf(c) => add_byte_to_half(src, dst, c),
            ByteFilter::SubByte(c) => sub_byte(src, dst, c),
            ByteFilter::MultByByte(c) => mult_by_byte(src, dst, c),
            ByteFilter::ShiftRight(n) => shift_right(src, dst, n),
            ByteFilter::ShiftRightAndMultByByte { shift, factor } => {
                shift_right_and_mult_by_byte(src, dst, shift, factor)
            }
            ByteFilter::ShiftLeft(n) => shift_left(src, dst, n),
            ByteFilter::ShiftLeftByte(n) => shift_left_byte(src, dst, n),
            ByteFilter::BinarizeUsingThreshold(t) => binarize_using_threshold(src, dst, t),
            ByteFilter::ClipToRange { min, max } => clip_to_range(src, dst, min, max),
            ByteFilter::NormalizeLinear {
                cmin,
                cmax,
                nmin,
                nmax,
            } => normalize_linear(src, dst, cmin, cmax, nmin, nmax),
        }
    }

    /// Run the filter over `buf`, replacing each byte with its result.
    ///
    /// Fails with the same errors as [`apply`](Self::apply), before any byte
    /// is changed.
    pub fn apply_inplace(self, buf: &mut [u8]) -> Result<(), FilterError> {
        if buf.is_empty() {
            return Ok(());
        }
        // A bad shift must fail before the first block is written.
        self.validate()?;
        crate::stage_inplace(buf, STAGE_LEN, |s, d| self.apply(s, d))
    }

    fn validate(self) -> Result<(), FilterError> {
        match self {
            ByteFilter::ShiftRight(n)
            | ByteFilter::ShiftRightAndMultByByte { shift: n, .. }
            | ByteFilter::ShiftLeft(n)
            | ByteFilter::ShiftLeftByte(n) => check_shift(n, MAX_BYTE_SHIFT),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::{vec, vec::Vec};

    fn all_bytes() -> Vec<u8> {
        (0..=255u8).collect()
    }

    fn run(filter: ByteFilter, src: &[u8]) -> Vec<u8> {
        let mut dst = vec![0u8; src.len()];
        filter.apply(src, &mut dst).unwrap();
        dst
    }

    #[test]
    fn test_bit_negation() {
        assert_eq!(run(ByteFilter::BitNegation, &[0, 0x0F, 255]), [255, 0xF0, 0]);
    }

    #[test]
    fn test_add_and_sub_byte() {
        assert_eq!(run(ByteFilter::AddByte(60), &[200, 10, 0]), [255, 70, 60]);
        assert_eq!(run(ByteFilter::SubByte(60), &[200, 10, 0]), [140, 0, 0]);
    }

    #[test]
    fn test_zero_constant_is_copy() {
        let src = all_bytes();
        assert_eq!(run(ByteFilter::AddByte(0), &src), src);
        assert_eq!(run(ByteFilter::SubByte(0), &src), src);
        assert_eq!(run(ByteFilter::MultByByte(1), &src), src);
        assert_eq!(run(ByteFilter::ShiftRight(0), &src), src);
        assert_eq!(run(ByteFilter::ShiftLeft(0), &src), src);
        assert_eq!(run(ByteFilter::ShiftLeftByte(0), &src), src);
        assert_eq!(
            run(ByteFilter::ShiftRightAndMultByByte { shift: 0, factor: 1 }, &src),
            src
        );
        assert_eq!(run(ByteFilter::ClipToRange { min: 0, max: 255 }, &src), src);
    }

    #[test]
    fn test_add_byte_to_half() {
        assert_eq!(run(ByteFilter::AddByteToHalf(10), &[255, 101, 0]), [137, 60, 10]);
        assert_eq!(run(ByteFilter::AddByteToHalf(200), &[255]), [255]);
    }

    #[test]
    fn test_mult_by_byte() {
        assert_eq!(run(ByteFilter::MultByByte(255), &[255, 0]), [255, 0]);
        assert_eq!(run(ByteFilter::MultByByte(0), &[255, 100]), [0, 0]);
        let half = run(ByteFilter::MultByByte(128), &[255])[0];
        assert!(half == 127 || half == 128, "got {half}");
    }

    #[test]
    fn test_shift_right() {
        assert_eq!(run(ByteFilter::ShiftRight(1), &[255, 3]), [127, 1]);
        assert_eq!(run(ByteFilter::ShiftRight(8), &[255, 128]), [0, 0]);
    }

    #[test]
    fn test_shift_right_and_mult() {
        let f = ByteFilter::ShiftRightAndMultByByte { shift: 1, factor: 255 };
        let out = run(f, &[255, 0]);
        assert!(out[0] == 126 || out[0] == 127, "got {}", out[0]);
        assert_eq!(out[1], 0);
    }

    #[test]
    fn test_shift_left_saturates() {
        assert_eq!(run(ByteFilter::ShiftLeft(1), &[100, 200]), [200, 255]);
        assert_eq!(run(ByteFilter::ShiftLeft(8), &[0, 1]), [0, 255]);
    }

    #[test]
    fn test_shift_left_byte_wraps() {
        assert_eq!(run(ByteFilter::ShiftLeftByte(1), &[200, 3]), [144, 6]);
        assert_eq!(run(ByteFilter::ShiftLeftByte(8), &[255, 1]), [0, 0]);
    }

    #[test]
    fn test_shift_out_of_range() {
        let mut dst = [7u8; 2];
        for f in [
            ByteFilter::ShiftRight(9),
            ByteFilter::ShiftLeft(9),
            ByteFilter::ShiftLeftByte(9),
            ByteFilter::ShiftRightAndMultByByte { shift: 9, factor: 1 },
        ] {
            assert_eq!(f.apply(&[1, 2], &mut dst), Err(FilterError::ShiftOutOfRange));
            assert_eq!(dst, [7, 7], "{f:?} wrote after failing");
        }
    }

    #[test]
    fn test_empty_skips_shift_check() {
        assert_eq!(shift_left(&[], &mut [], 9), Ok(()));
        assert_eq!(shift_right(&[], &mut [], 100), Ok(()));
    }

    #[test]
    fn test_binarize() {
        assert_eq!(
            run(ByteFilter::BinarizeUsingThreshold(128), &[127, 128, 255, 0]),
            [0, 255, 255, 0]
        );
        assert_eq!(run(ByteFilter::BinarizeUsingThreshold(0), &[0, 1]), [255, 255]);
    }

    #[test]
    fn test_clip_to_range() {
        let f = ByteFilter::ClipToRange { min: 10, max: 200 };
        assert_eq!(run(f, &[0, 10, 100, 200, 255]), [10, 10, 100, 200, 200]);
    }

    #[test]
    fn test_clip_to_inverted_range() {
        let f = ByteFilter::ClipToRange { min: 200, max: 10 };
        assert_eq!(run(f, &[0, 100, 199, 200, 255]), [200, 200, 200, 10, 10]);
    }

    #[test]
    fn test_normalize_linear_identity() {
        let f = ByteFilter::NormalizeLinear {
            cmin: 0,
            cmax: 255,
            nmin: 0,
            nmax: 255,
        };
        let out = run(f, &all_bytes());
        for (s, d) in all_bytes().into_iter().zip(out) {
            assert!(s.abs_diff(d) <= 1, "s={s} d={d}");
        }
    }

    #[test]
    fn test_normalize_linear_clamps() {
        let f = ByteFilter::NormalizeLinear {
            cmin: 100,
            cmax: 150,
            nmin: 0,
            nmax: 255,
        };
        let out = run(f, &[0, 50, 200, 255]);
        assert_eq!(out, [0, 0, 255, 255]);
    }

    #[test]
    fn test_normalize_linear_flat_range_writes_nothing() {
        let mut dst = [9u8; 3];
        normalize_linear(&[1, 2, 3], &mut dst, 40, 40, 0, 255).unwrap();
        assert_eq!(dst, [9, 9, 9]);
    }

    #[test]
    fn test_normalize_linear_distinct_large_bounds_still_map() {
        // 16777216 and 16777217 are the same f32, but not the same range
        let mut dst = [9u8; 3];
        normalize_linear(&[0, 128, 255], &mut dst, 16_777_216, 16_777_217, 0, 255).unwrap();
        assert_eq!(dst, [0, 0, 0]);
    }

    #[test]
    fn test_length_mismatch() {
        let mut dst = [0u8; 2];
        assert_eq!(add_byte(&[1, 2, 3], &mut dst, 1), Err(FilterError::LengthMismatch));
        assert_eq!(shift_left(&[1], &mut dst, 1), Err(FilterError::LengthMismatch));
    }

    #[test]
    fn test_inplace_matches_copy() {
        let src: Vec<u8> = (0..2500).map(|i| (i * 37 % 256) as u8).collect();
        for f in [
            ByteFilter::BitNegation,
            ByteFilter::AddByte(17),
            ByteFilter::AddByteToHalf(3),
            ByteFilter::SubByte(40),
            ByteFilter::MultByByte(77),
            ByteFilter::ShiftRight(3),
            ByteFilter::ShiftRightAndMultByByte { shift: 2, factor: 200 },
            ByteFilter::ShiftLeft(2),
            ByteFilter::ShiftLeftByte(5),
            ByteFilter::BinarizeUsingThreshold(90),
            ByteFilter::ClipToRange { min: 30, max: 180 },
            ByteFilter::ClipToRange { min: 180, max: 30 },
            ByteFilter::NormalizeLinear {
                cmin: 20,
                cmax: 220,
                nmin: 0,
                nmax: 255,
            },
        ] {
            let expected = run(f, &src);
            let mut buf = src.clone();
            f.apply_inplace(&mut buf).unwrap();
            assert_eq!(buf, expected, "{f:?}");
        }
    }

    #[test]
    fn test_inplace_rejects_bad_shift_untouched() {
        let mut buf = [5u8; 300];
        assert_eq!(
            ByteFilter::ShiftLeft(12).apply_inplace(&mut buf),
            Err(FilterError::ShiftOutOfRange)
        );
        assert!(buf.iter().all(|&b| b == 5));
    }
}
