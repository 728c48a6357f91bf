//! # bytefilter
//!
//! Elementwise filters over raw byte buffers: saturating arithmetic, bitwise
//! logic, bit shifts, thresholding, and multi-byte ("BPP") constants.
//!
//! Every filter reads one or two source slices and writes a destination slice
//! of the same length. Bytes are opaque; the only grouping the library knows
//! about is the bytes-per-unit stride of the [`bpp`] filters. The integer
//! filters are SIMD-accelerated on x86-64 AVX2, AArch64 and WASM SIMD128
//! with automatic fallback to scalar code, and every tier produces the same
//! bytes.
//!
//! ## Families
//!
//! - [`dual`]: two sources combined byte by byte (`add`, `sub`, `mean`,
//!   `mult`, `div`, …).
//! - [`single`]: one source and a scalar (`add_byte`, `shift_left`,
//!   `binarize_using_threshold`, `normalize_linear`, …).
//! - [`bpp`]: one source and a multi-byte constant distributed big-endian
//!   over each `bpp`-byte unit.
//! - [`neighborhood`]: convolution and Sobel-X entry points. They validate
//!   their parameters and then return [`FilterError::NotImplemented`].
//!
//! ```rust
//! use bytefilter::{add, add_byte, binarize_using_threshold};
//!
//! let a = [200u8, 10, 0];
//! let b = [100u8, 20, 0];
//! let mut out = [0u8; 3];
//! add(&a, &b, &mut out).unwrap();
//! assert_eq!(out, [255, 30, 0]);
//!
//! add_byte(&a, &mut out, 60).unwrap();
//! assert_eq!(out, [255, 70, 60]);
//!
//! binarize_using_threshold(&a, &mut out, 10).unwrap();
//! assert_eq!(out, [255, 255, 0]);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: Filters over typed pixel slices (any `bytemuck::Pod` pixel,
//!   with [`rgb`] convenience wrappers).
//! - **`imgref`**: Row-by-row filters over strided [`imgref`] views.
//!   Implies `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

mod kernels;

pub mod bpp;
pub mod dual;
pub mod neighborhood;
pub mod single;

pub use bpp::*;
pub use dual::*;
pub use neighborhood::*;
pub use single::*;

#[cfg(feature = "rgb")]
pub mod typed;

#[cfg(feature = "imgref")]
pub mod imgref;

/// Widest unit the [`bpp`] filters accept, in bytes.
pub const MAX_BYTES_PER_PIXEL: usize = 16;

/// Largest shift accepted by the byte-wide shift filters.
pub const MAX_BYTE_SHIFT: u32 = 8;

/// Largest shift accepted by the unit-wide shift filters.
pub const MAX_UNIT_SHIFT: u32 = 32;

/// Why a filter refused to run.
///
/// Validation happens before the destination is touched, so an `Err` always
/// means no byte was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FilterError {
    /// Source and destination slices differ in length.
    LengthMismatch,
    /// `bpp` is zero or wider than [`MAX_BYTES_PER_PIXEL`].
    BppOutOfRange,
    /// A shift amount is above the filter's limit.
    ShiftOutOfRange,
    /// A kernel slice does not hold `dim * dim` weights.
    KernelSizeMismatch,
    /// `rows` or `columns` is too small for the neighborhood.
    GeometryTooSmall,
    /// A convolution divisor of zero.
    ZeroDivisor,
    /// Strided views of different width or height.
    DimensionMismatch,
    /// The neighborhood transform is reserved but has no implementation yet.
    ///
    /// Returned only after every parameter has passed validation.
    NotImplemented,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FilterError::LengthMismatch => "source and destination lengths differ",
            FilterError::BppOutOfRange => "bytes per unit must be between 1 and 16",
            FilterError::ShiftOutOfRange => "shift amount out of range",
            FilterError::KernelSizeMismatch => "kernel weight count does not match its size",
            FilterError::GeometryTooSmall => "rows or columns too small for the kernel",
            FilterError::ZeroDivisor => "divisor must be non-zero",
            FilterError::DimensionMismatch => "image dimensions differ",
            FilterError::NotImplemented => "neighborhood filter not implemented",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for FilterError {}

// ===========================================================================
// Shared validation
// ===========================================================================

#[inline]
pub(crate) fn check_len(src_len: usize, dst_len: usize) -> Result<(), FilterError> {
    if src_len != dst_len {
        Err(FilterError::LengthMismatch)
    } else {
        Ok(())
    }
}

#[inline]
pub(crate) fn check_shift(n: u32, max: u32) -> Result<(), FilterError> {
    if n > max {
        Err(FilterError::ShiftOutOfRange)
    } else {
        Ok(())
    }
}

// ===========================================================================
// Unit-interval helpers
// ===========================================================================

#[inline(always)]
pub(crate) fn to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Truncating conversion back to a byte. `as` saturates, so negative values
/// land on 0 and anything above 1.0 on 255.
#[inline(always)]
pub(crate) fn from_unit(x: f32) -> u8 {
    (x * 255.0) as u8
}

#[inline(always)]
pub(crate) fn from_unit_rounded(x: f32) -> u8 {
    (x * 255.0 + 0.5) as u8
}

// ===========================================================================
// In-place staging
// ===========================================================================

pub(crate) const STAGE_LEN: usize = 1024;

/// Run a copy-form filter over `buf` in place, staging each block of source
/// bytes on the stack. `block` must be in `1..=STAGE_LEN`.
pub(crate) fn stage_inplace(
    buf: &mut [u8],
    block: usize,
    mut f: impl FnMut(&[u8], &mut [u8]) -> Result<(), FilterError>,
) -> Result<(), FilterError> {
    let mut stage = [0u8; STAGE_LEN];
    for chunk in buf.chunks_mut(block) {
        let n = chunk.len();
        stage[..n].copy_from_slice(chunk);
        f(&stage[..n], chunk)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_helpers_saturate() {
        assert_eq!(from_unit(1.0), 255);
        assert_eq!(from_unit(1.5), 255);
        assert_eq!(from_unit(-0.25), 0);
        assert_eq!(from_unit(to_unit(0)), 0);
        assert_eq!(from_unit_rounded(0.5), 128);
    }

    #[test]
    fn check_helpers() {
        assert_eq!(check_len(3, 3), Ok(()));
        assert_eq!(check_len(3, 4), Err(FilterError::LengthMismatch));
        assert_eq!(check_shift(8, MAX_BYTE_SHIFT), Ok(()));
        assert_eq!(check_shift(9, MAX_BYTE_SHIFT), Err(FilterError::ShiftOutOfRange));
    }

    #[test]
    fn stage_inplace_covers_whole_buffer() {
        let mut buf = [7u8; 2500];
        stage_inplace(&mut buf, STAGE_LEN, |s, d| {
            for (a, b) in s.iter().zip(d.iter_mut()) {
                *b = a + 1;
            }
            Ok(())
        })
        .unwrap();
        assert!(buf.iter().all(|&b| b == 8));
    }
}
