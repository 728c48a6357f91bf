//! Multi-byte ("BPP") constant filters.
//!
//! The buffer is split into units of `bpp` bytes, `bpp` in `1..=16`. A
//! constant is laid over each unit big-endian: its lowest byte lines up with
//! the last byte of the unit. Bytes of the constant above the unit width are
//! ignored. A trailing partial unit is copied through unchanged.
//!
//! ```rust
//! use bytefilter::add_uint;
//!
//! let src = [0x10, 0xF0, 0x10, 0xF0, 0x77];
//! let mut dst = [0u8; 5];
//! add_uint(&src, &mut dst, 2, 0x0120).unwrap();
//! // each byte saturates on its own; the lone trailing byte is untouched
//! assert_eq!(dst, [0x11, 0xFF, 0x11, 0xFF, 0x77]);
//! ```

use crate::{
    FilterError, MAX_BYTES_PER_PIXEL, MAX_UNIT_SHIFT, STAGE_LEN, check_len, check_shift, kernels,
};

#[inline]
fn check_bpp(bpp: usize) -> Result<(), FilterError> {
    if bpp == 0 || bpp > MAX_BYTES_PER_PIXEL {
        Err(FilterError::BppOutOfRange)
    } else {
        Ok(())
    }
}

/// Largest multiple of `bpp` that fits in a staging block.
#[inline]
fn unit_block(bpp: usize) -> usize {
    (STAGE_LEN / bpp) * bpp
}

/// The low `bpp` bytes of a constant, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitConstant {
    bytes: [u8; MAX_BYTES_PER_PIXEL],
    bpp: usize,
}

impl UnitConstant {
    /// Decompose `c` for units of `bpp` bytes.
    pub fn new(c: u128, bpp: usize) -> Result<Self, FilterError> {
        check_bpp(bpp)?;
        let be = c.to_be_bytes();
        let mut bytes = [0u8; MAX_BYTES_PER_PIXEL];
        bytes[..bpp].copy_from_slice(&be[MAX_BYTES_PER_PIXEL - bpp..]);
        Ok(Self { bytes, bpp })
    }

    /// Bytes per unit.
    pub fn bpp(&self) -> usize {
        self.bpp
    }

    /// The unit-wide constant, `bpp` bytes long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bpp]
    }

    /// Fill `out` with the constant repeated from its start.
    fn tile(&self, out: &mut [u8]) {
        for unit in out.chunks_mut(self.bpp) {
            unit.copy_from_slice(&self.bytes[..unit.len()]);
        }
    }
}

// ===========================================================================
// Per-byte saturating filters
// ===========================================================================

fn unit_dual(
    src: &[u8],
    dst: &mut [u8],
    bpp: usize,
    c: u128,
    kernel: fn(&[u8], &[u8], &mut [u8]),
) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    let constant = UnitConstant::new(c, bpp)?;
    if c == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }

    let block = unit_block(bpp);
    let mut pattern = [0u8; STAGE_LEN];
    constant.tile(&mut pattern[..block]);

    let whole = src.len() - src.len() % bpp;
    let (src_units, src_tail) = src.split_at(whole);
    let (dst_units, dst_tail) = dst.split_at_mut(whole);
    for (s, d) in src_units.chunks(block).zip(dst_units.chunks_mut(block)) {
        kernel(s, &pattern[..s.len()], d);
    }
    dst_tail.copy_from_slice(src_tail);
    Ok(())
}

/// Add `c` byte by byte to every `bpp`-byte unit, saturating each byte at 255.
///
/// No carry crosses byte boundaries.
pub fn add_uint(src: &[u8], dst: &mut [u8], bpp: usize, c: u128) -> Result<(), FilterError> {
    unit_dual(src, dst, bpp, c, kernels::add)
}

/// Subtract `c` byte by byte from every `bpp`-byte unit, saturating each byte
/// at 0.
pub fn sub_uint(src: &[u8], dst: &mut [u8], bpp: usize, c: u128) -> Result<(), FilterError> {
    unit_dual(src, dst, bpp, c, kernels::sub)
}

// ===========================================================================
// Unit-wide shifts
// ===========================================================================

#[inline]
fn load_be(unit: &[u8]) -> u128 {
    unit.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b))
}

#[inline]
fn store_be(v: u128, unit: &mut [u8]) {
    let be = v.to_be_bytes();
    unit.copy_from_slice(&be[MAX_BYTES_PER_PIXEL - unit.len()..]);
}

fn unit_shift(
    src: &[u8],
    dst: &mut [u8],
    bpp: usize,
    n: u32,
    shift: impl Fn(u128) -> u128,
) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    if src.is_empty() {
        return Ok(());
    }
    check_bpp(bpp)?;
    check_shift(n, MAX_UNIT_SHIFT)?;
    if n == 0 {
        dst.copy_from_slice(src);
        return Ok(());
    }

    let mut s_units = src.chunks_exact(bpp);
    let mut d_units = dst.chunks_exact_mut(bpp);
    for (s, d) in (&mut s_units).zip(&mut d_units) {
        // store_be keeps only the low bpp bytes, which truncates left shifts
        store_be(shift(load_be(s)), d);
    }
    d_units.into_remainder().copy_from_slice(s_units.remainder());
    Ok(())
}

/// Shift every `bpp`-byte big-endian unit left by `n` bits, `n` in `0..=32`.
///
/// Bits shifted past the top of the unit are lost.
pub fn shift_left_uint(src: &[u8], dst: &mut [u8], bpp: usize, n: u32) -> Result<(), FilterError> {
    unit_shift(src, dst, bpp, n, |v| v << n)
}

/// Shift every `bpp`-byte big-endian unit right by `n` bits, `n` in `0..=32`.
pub fn shift_right_uint(
    src: &[u8],
    dst: &mut [u8],
    bpp: usize,
    n: u32,
) -> Result<(), FilterError> {
    unit_shift(src, dst, bpp, n, |v| v >> n)
}

// ===========================================================================
// Enum dispatch
// ===========================================================================

/// A unit filter and its parameter. The unit width is passed at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitFilter {
    AddUint(u128),
    SubUint(u128),
    ShiftLeftUint(u32),
    ShiftRightUint(u32),
}

impl UnitFilter {
    /// Run the filter over units of `bpp` bytes, writing `dst`.
    pub fn apply(self, src: &[u8], dst: &mut [u8], bpp: usize) -> Result<(), FilterError> {
        match self {
            UnitFilter::AddUint(c) => add_uint(src, dst, bpp, c),
            UnitFilter::SubUint(c) => sub_uint(src, dst, bpp, c),
            UnitFilter::ShiftLeftUint(n) => shift_left_uint(src, dst, bpp, n),
            UnitFilter::ShiftRightUint(n) => shift_right_uint(src, dst, bpp, n),
        }
    }

    /// Run the filter over `buf` in place.
    pub fn apply_inplace(self, buf: &mut [u8], bpp: usize) -> Result<(), FilterError> {
        if buf.is_empty() {
            return Ok(());
        }
        check_bpp(bpp)?;
        if let UnitFilter::ShiftLeftUint(n) | UnitFilter::ShiftRightUint(n) = self {
            check_shift(n, MAX_UNIT_SHIFT)?;
        }
        // Blocks hold whole units, so only the final block can end mid-unit.
        crate::stage_inplace(buf, unit_block(bpp), |s, d| self.apply(s, d, bpp))
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use alloc::{vec, vec::Vec};

    fn run(filter: UnitFilter, src: &[u8], bpp: usize) -> Vec<u8> {
        let mut dst = vec![0u8; src.len()];
        filter.apply(src, &mut dst, bpp).unwrap();
        dst
    }

    #[test]
    fn test_unit_constant_big_endian() {
        let k = UnitConstant::new(0x0102_0304, 4).unwrap();
        assert_eq!(k.as_bytes(), [1, 2, 3, 4]);
        assert_eq!(k.bpp(), 4);
        // high bytes beyond the unit width are dropped
        let k = UnitConstant::new(0xAABB_CCDD, 2).unwrap();
        assert_eq!(k.as_bytes(), [0xCC, 0xDD]);
        let k = UnitConstant::new(u128::MAX, 16).unwrap();
        assert_eq!(k.as_bytes(), [0xFF; 16]);
    }

    #[test]
    fn test_bpp_out_of_range() {
        let mut dst = [0u8; 4];
        for bpp in [0, 17, 1000] {
            assert_eq!(
                UnitFilter::AddUint(1).apply(&[1, 2, 3, 4], &mut dst, bpp),
                Err(FilterError::BppOutOfRange)
            );
            assert_eq!(
                UnitFilter::ShiftLeftUint(1).apply(&[1, 2, 3, 4], &mut dst, bpp),
                Err(FilterError::BppOutOfRange)
            );
        }
        assert_eq!(dst, [0; 4]);
        assert_eq!(UnitConstant::new(1, 0), Err(FilterError::BppOutOfRange));
    }

    #[test]
    fn test_add_uint_per_byte_saturation() {
        let out = run(UnitFilter::AddUint(0x0102_0304), &[0xFF, 0x00, 0x10, 0xFE, 0, 0, 0, 0], 4);
        assert_eq!(out, [0xFF, 0x02, 0x13, 0xFF, 1, 2, 3, 4]);
    }

    #[test]
    fn test_sub_uint_per_byte_saturation() {
        let out = run(UnitFilter::SubUint(0x0102), &[0, 5, 3, 1], 2);
        assert_eq!(out, [0, 3, 2, 0]);
    }

    #[test]
    fn test_trailing_partial_unit_passes_through() {
        let src: Vec<u8> = (0..11).collect();
        let out = run(UnitFilter::AddUint(0x0101_0101), &src, 4);
        assert_eq!(&out[..8], [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&out[8..], [8, 9, 10]);

        let out = run(UnitFilter::ShiftLeftUint(4), &src, 4);
        assert_eq!(&out[8..], [8, 9, 10]);
    }

    #[test]
    fn test_buffer_shorter_than_unit_is_copy() {
        let out = run(UnitFilter::AddUint(0xFFFF_FFFF), &[1, 2, 3], 4);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn test_zero_constant_and_zero_shift_copy() {
        let src: Vec<u8> = (0..=255).collect();
        assert_eq!(run(UnitFilter::AddUint(0), &src, 3), src);
        assert_eq!(run(UnitFilter::SubUint(0), &src, 3), src);
        assert_eq!(run(UnitFilter::ShiftLeftUint(0), &src, 3), src);
        assert_eq!(run(UnitFilter::ShiftRightUint(0), &src, 3), src);
    }

    #[test]
    fn test_shift_left_uint_truncates() {
        let out = run(UnitFilter::ShiftLeftUint(4), &[0x12, 0x34, 0xAB, 0xCD], 2);
        assert_eq!(out, [0x23, 0x40, 0xBC, 0xD0]);
        // a full-width shift of a two-byte unit clears it
        let out = run(UnitFilter::ShiftLeftUint(16), &[0xFF, 0xFF], 2);
        assert_eq!(out, [0, 0]);
    }

    #[test]
    fn test_shift_right_uint() {
        let out = run(UnitFilter::ShiftRightUint(4), &[0x12, 0x34, 0x56, 0x78], 4);
        assert_eq!(out, [0x01, 0x23, 0x45, 0x67]);
        let out = run(UnitFilter::ShiftRightUint(32), &[0xFF; 8], 8);
        assert_eq!(out, [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_shift_16_byte_units() {
        let mut src = [0u8; 16];
        src[0] = 0x80;
        src[15] = 0x01;
        let out = run(UnitFilter::ShiftLeftUint(1), &src, 16);
        let mut expected = [0u8; 16];
        expected[15] = 0x02;
        assert_eq!(out, expected);
    }

    #[test]
    fn test_shift_out_of_range() {
        let mut dst = [0u8; 4];
        assert_eq!(
            shift_left_uint(&[1, 2, 3, 4], &mut dst, 4, 33),
            Err(FilterError::ShiftOutOfRange)
        );
        assert_eq!(
            shift_right_uint(&[1, 2, 3, 4], &mut dst, 4, 33),
            Err(FilterError::ShiftOutOfRange)
        );
        assert_eq!(shift_right_uint(&[], &mut [], 4, 33), Ok(()));
    }

    #[test]
    fn test_add_uint_long_buffer_keeps_phase() {
        // spans several pattern blocks with a unit width that does not divide them
        let src = vec![0u8; 3 * 1000 + 2];
        let out = run(UnitFilter::AddUint(0x0A_0B_0C), &src, 3);
        for (i, unit) in out[..3000].chunks(3).enumerate() {
            assert_eq!(unit, [0x0A, 0x0B, 0x0C], "unit {i}");
        }
        assert_eq!(&out[3000..], [0, 0]);
    }

    #[test]
    fn test_inplace_matches_copy() {
        let src: Vec<u8> = (0..2503).map(|i| (i * 53 % 256) as u8).collect();
        for bpp in [1, 3, 4, 7, 16] {
            for f in [
                UnitFilter::AddUint(0x1234_5678_9ABC),
                UnitFilter::SubUint(0x0F0F_0F0F),
                UnitFilter::ShiftLeftUint(5),
                UnitFilter::ShiftRightUint(9),
            ] {
                let expected = run(f, &src, bpp);
                let mut buf = src.clone();
                f.apply_inplace(&mut buf, bpp).unwrap();
                assert_eq!(buf, expected, "{f:?} bpp={bpp}");
            }
        }
    }
}
