//! Dual-source elementwise filters.
//!
//! Each filter combines `src1[i]` with `src2[i]` into `dst[i]`. All three
//! slices must have the same length; an empty buffer succeeds without doing
//! anything. The integer filters ([`add`], [`sub`], [`abs_diff`],
//! [`bit_and`], [`bit_or`]) are SIMD-dispatched. The blend filters work in
//! the unit interval (`byte / 255`) in `f32` and truncate on the way back,
//! except [`mean`] which rounds.

use crate::{FilterError, STAGE_LEN, check_len, from_unit, from_unit_rounded, kernels, to_unit};

#[inline]
fn check_dual(a: usize, b: usize, dst: usize) -> Result<(), FilterError> {
    check_len(a, dst)?;
    check_len(b, dst)
}

#[inline(always)]
fn blend(src1: &[u8], src2: &[u8], dst: &mut [u8], f: impl Fn(u8, u8) -> u8) {
    for ((&a, &b), d) in src1.iter().zip(src2).zip(dst.iter_mut()) {
        *d = f(a, b);
    }
}

// ===========================================================================
// Integer filters
// ===========================================================================

/// `D = min(S1 + S2, 255)`
pub fn add(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    kernels::add(src1, src2, dst);
    Ok(())
}

/// `D = max(S1 - S2, 0)`
pub fn sub(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    kernels::sub(src1, src2, dst);
    Ok(())
}

/// `D = |S1 - S2|`
pub fn abs_diff(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    kernels::abs_diff(src1, src2, dst);
    Ok(())
}

/// `D = S1 & S2`
pub fn bit_and(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    kernels::and(src1, src2, dst);
    Ok(())
}

/// `D = S1 | S2`
pub fn bit_or(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    kernels::or(src1, src2, dst);
    Ok(())
}

/// `D = S1 * S2`, keeping only the low 8 bits of the product.
///
/// Deliberately unsaturated: `16 * 16 == 0`.
pub fn mult_unbound(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, u8::wrapping_mul);
    Ok(())
}

// ===========================================================================
// Unit-interval filters
// ===========================================================================

/// Average of the two sources, `D = round((S1/2 + S2/2) / 255 * 255)`.
pub fn mean(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, |a, b| {
        from_unit_rounded(to_unit(a) / 2.0 + to_unit(b) / 2.0)
    });
    Ok(())
}

/// Multiply blend, `D = (S1/255) * (S2/255) * 255`, truncated.
///
/// The product of two unit values never leaves `[0, 1]`, so no clamp is
/// needed. Code ported from `SDL_imageFilterMult` should note that it reads
/// `S1` for both operands; here `S2` is the second operand.
pub fn mult(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, |a, b| from_unit(to_unit(a) * to_unit(b)));
    Ok(())
}

/// Screen blend, `D = (1 - (1 - S1/255) * (1 - S2/255)) * 255`, truncated.
pub fn mult_inv(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, |a, b| {
        from_unit(1.0 - (1.0 - to_unit(a)) * (1.0 - to_unit(b)))
    });
    Ok(())
}

/// `D = min(1, (S1/255 * S2/255) / 2) * 255`, truncated.
pub fn mult_div_by_2(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, |a, b| {
        from_unit(((to_unit(a) * to_unit(b)) / 2.0).min(1.0))
    });
    Ok(())
}

/// `D = min(1, (S1/255 * S2/255) / 4) * 255`, truncated.
pub fn mult_div_by_4(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, |a, b| {
        from_unit(((to_unit(a) * to_unit(b)) / 4.0).min(1.0))
    });
    Ok(())
}

/// `D = min(1, S1 / S2) * 255`, truncated, with `D = 0` wherever `S2 == 0`.
///
/// Any `S1 >= S2 > 0` therefore saturates to 255. The ratio is fractional:
/// `SDL_imageFilterDiv` divides integers and only ever yields 0 or 255, while
/// `div([50], [100])` gives 127 here.
pub fn div(src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
    check_dual(src1.len(), src2.len(), dst.len())?;
    blend(src1, src2, dst, |a, b| {
        if b == 0 {
            0
        } else {
            from_unit((to_unit(a) / to_unit(b)).min(1.0))
        }
    });
    Ok(())
}

// ===========================================================================
// Enum dispatch
// ===========================================================================

/// A dual-source filter selected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DualFilter {
    Add,
    Mean,
    Sub,
    AbsDiff,
    Mult,
    MultUnbound,
    MultInv,
    MultDivBy2,
    MultDivBy4,
    BitAnd,
    BitOr,
    Div,
}

impl DualFilter {
    /// Every variant, in declaration order.
    pub const ALL: [DualFilter; 12] = [
        DualFilter::Add,
        DualFilter::Mean,
        DualFilter::Sub,
        DualFilter::AbsDiff,
        DualFilter::Mult,
        DualFilter::MultUnbound,
        DualFilter::MultInv,
        DualFilter::MultDivBy2,
        DualFilter::MultDivBy4,
        DualFilter::BitAnd,
        DualFilter::BitOr,
        DualFilter::Div,
    ];

    /// Run the filter, writing `dst`.
    pub fn apply(self, src1: &[u8], src2: &[u8], dst: &mut [u8]) -> Result<(), FilterError> {
        let f = match self {
            DualFilter::Add => add,
            DualFilter::Mean => mean,
            DualFilter::Sub => sub,
            DualFilter::AbsDiff => abs_diff,
            DualFilter::Mult => mult,
            DualFilter::MultUnbound => mult_unbound,
            DualFilter::MultInv => mult_inv,
            DualFilter::MultDivBy2 => mult_div_by_2,
            DualFilter::MultDivBy4 => mult_div_by_4,
            DualFilter::BitAnd => bit_and,
            DualFilter::BitOr => bit_or,
            DualFilter::Div => div,
        };
        f(src1, src2, dst)
    }

    /// Run the filter with `acc` as both the first source and the destination.
    pub fn apply_inplace(self, acc: &mut [u8], src2: &[u8]) -> Result<(), FilterError> {
        check_len(src2.len(), acc.len())?;
        let mut offset = 0;
        crate::stage_inplace(acc, STAGE_LEN, |s1, d| {
            let s2 = &src2[offset..offset + s1.len()];
            offset += s1.len();
            self.apply(s1, s2, d)
        })
    }
}
