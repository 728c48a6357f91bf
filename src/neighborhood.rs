//! Neighborhood filters: square-kernel convolution and Sobel-X edge detection.
//!
//! The entry points are part of the API but the transforms themselves are
//! reserved. Every call validates its parameters and then returns
//! [`FilterError::NotImplemented`]. The destination is never written.
//!
//! Buffers are `rows * columns` bytes, row-major, one byte per sample.

use crate::{FilterError, check_len};

/// Shifts at or above this are rejected by the shift-right normalizations.
const MAX_NORM_SHIFT: u8 = 7;

/// Side length of a square convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelSize {
    K3,
    K5,
    K7,
    K9,
}

impl KernelSize {
    /// Kernel side length in samples.
    pub const fn dim(self) -> usize {
        match self {
            KernelSize::K3 => 3,
            KernelSize::K5 => 5,
            KernelSize::K7 => 7,
            KernelSize::K9 => 9,
        }
    }

    /// Number of weights a kernel of this size holds.
    pub const fn weights(self) -> usize {
        self.dim() * self.dim()
    }
}

/// How a convolution sum is scaled back into a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Divide by a non-zero constant.
    Divide(u8),
    /// Shift right by `0..7` bits.
    ShiftRight(u8),
}

impl Normalization {
    pub(crate) fn validate(self) -> Result<(), FilterError> {
        match self {
            Normalization::Divide(0) => Err(FilterError::ZeroDivisor),
            Normalization::ShiftRight(n) if n >= MAX_NORM_SHIFT => {
                Err(FilterError::ShiftOutOfRange)
            }
            _ => Ok(()),
        }
    }
}

// ===========================================================================
// Convolution
// ===========================================================================

/// Convolve `src` with a `size` kernel, normalizing each sum with `norm`.
///
/// Checks, in order: buffer lengths, kernel weight count, `rows` and
/// `columns` both greater than the kernel side, then the normalization
/// parameter. A call that passes every check returns
/// [`FilterError::NotImplemented`].
pub fn convolve(
    src: &[u8],
    dst: &mut [u8],
    rows: usize,
    columns: usize,
    kernel: &[i16],
    size: KernelSize,
    norm: Normalization,
) -> Result<(), FilterError> {
    check_convolve(src.len(), dst.len(), rows, columns, kernel, size, norm)?;
    Err(FilterError::NotImplemented)
}

pub(crate) fn check_convolve(
    src_len: usize,
    dst_len: usize,
    rows: usize,
    columns: usize,
    kernel: &[i16],
    size: KernelSize,
    norm: Normalization,
) -> Result<(), FilterError> {
    check_len(src_len, dst_len)?;
    if kernel.len() != size.weights() {
        return Err(FilterError::KernelSizeMismatch);
    }
    let dim = size.dim();
    if rows <= dim || columns <= dim {
        return Err(FilterError::GeometryTooSmall);
    }
    norm.validate()
}

macro_rules! fixed_kernel {
    ($divide:ident, $shift:ident, $size:expr, $n:literal, $label:literal) => {
        #[doc = concat!("Convolve with a ", $label, " kernel and divide each sum by `divisor`.")]
        pub fn $divide(
            src: &[u8],
            dst: &mut [u8],
            rows: usize,
            columns: usize,
            kernel: &[i16; $n],
            divisor: u8,
        ) -> Result<(), FilterError> {
            convolve(src, dst, rows, columns, kernel, $size, Normalization::Divide(divisor))
        }

        #[doc = concat!("Convolve with a ", $label, " kernel and shift each sum right by `shift`.")]
        pub fn $shift(
            src: &[u8],
            dst: &mut [u8],
            rows: usize,
            columns: usize,
            kernel: &[i16; $n],
            shift: u8,
        ) -> Result<(), FilterError> {
            convolve(src, dst, rows, columns, kernel, $size, Normalization::ShiftRight(shift))
        }
    };
}

fixed_kernel!(
    convolve_kernel_3x3_divide,
    convolve_kernel_3x3_shift_right,
    KernelSize::K3,
    9,
    "3x3"
);
fixed_kernel!(
    convolve_kernel_5x5_divide,
    convolve_kernel_5x5_shift_right,
    KernelSize::K5,
    25,
    "5x5"
);
fixed_kernel!(
    convolve_kernel_7x7_divide,
    convolve_kernel_7x7_shift_right,
    KernelSize::K7,
    49,
    "7x7"
);
fixed_kernel!(
    convolve_kernel_9x9_divide,
    convolve_kernel_9x9_shift_right,
    KernelSize::K9,
    81,
    "9x9"
);

// ===========================================================================
// Sobel-X
// ===========================================================================

pub(crate) fn check_sobel(
    src_len: usize,
    dst_len: usize,
    rows: usize,
    columns: usize,
) -> Result<(), FilterError> {
    check_len(src_len, dst_len)?;
    if rows <= 2 || columns <= 7 {
        return Err(FilterError::GeometryTooSmall);
    }
    Ok(())
}

/// Horizontal Sobel edge detection. Needs `rows > 2` and `columns > 7`.
pub fn sobel_x(src: &[u8], dst: &mut [u8], rows: usize, columns: usize) -> Result<(), FilterError> {
    check_sobel(src.len(), dst.len(), rows, columns)?;
    Err(FilterError::NotImplemented)
}

/// Horizontal Sobel edge detection with each result shifted right by `shift`
/// (`0..7`).
pub fn sobel_x_shift_right(
    src: &[u8],
    dst: &mut [u8],
    rows: usize,
    columns: usize,
    shift: u8,
) -> Result<(), FilterError> {
    check_sobel(src.len(), dst.len(), rows, columns)?;
    Normalization::ShiftRight(shift).validate()?;
    Err(FilterError::NotImplemented)
}
