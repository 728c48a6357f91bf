//! Whole-image filters over strided [`imgref`] views.
//!
//! Filters run row by row, so padding between rows (`stride > width`) is
//! never read or written. Source and destination views must have the same
//! width and height. No allocation; the caller owns every buffer.
//!
//! ```rust
//! use rgb::Rgba;
//! use ::imgref::{ImgVec, ImgRefMut};
//! use bytefilter::{DualFilter, imgref};
//!
//! let a = ImgVec::new(vec![Rgba::new(200u8, 0, 10, 255); 4], 2, 2);
//! let b = ImgVec::new(vec![Rgba::new(100u8, 5, 10, 255); 4], 2, 2);
//! let mut out = vec![Rgba::default(); 4];
//! imgref::dual_filter(DualFilter::Add, a.as_ref(), b.as_ref(), ImgRefMut::new(&mut out, 2, 2))
//!     .unwrap();
//! assert_eq!(out[0], Rgba::new(255, 5, 20, 255));
//! ```

use bytemuck::Pod;
use imgref::{ImgRef, ImgRefMut};

use crate::typed::{pixel_bytes, pixel_bytes_mut};
use crate::{ByteFilter, DualFilter, FilterError, KernelSize, Normalization, UnitFilter};

// ---------------------------------------------------------------------------
// Dimension check
// ---------------------------------------------------------------------------

fn check_dims(sw: usize, sh: usize, dw: usize, dh: usize) -> Result<(), FilterError> {
    if sw != dw || sh != dh {
        Err(FilterError::DimensionMismatch)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Elementwise filters
// ---------------------------------------------------------------------------

/// Combine two images with a [`DualFilter`], writing `dst`.
pub fn dual_filter<P: Pod>(
    filter: DualFilter,
    src1: ImgRef<'_, P>,
    src2: ImgRef<'_, P>,
    mut dst: ImgRefMut<'_, P>,
) -> Result<(), FilterError> {
    check_dims(src1.width(), src1.height(), dst.width(), dst.height())?;
    check_dims(src2.width(), src2.height(), dst.width(), dst.height())?;
    for ((r1, r2), d) in src1.rows().zip(src2.rows()).zip(dst.rows_mut()) {
        filter.apply(pixel_bytes(r1)?, pixel_bytes(r2)?, pixel_bytes_mut(d)?)?;
    }
    Ok(())
}

/// Combine `other` into `acc` with a [`DualFilter`].
pub fn dual_filter_inplace<P: Pod>(
    filter: DualFilter,
    mut acc: ImgRefMut<'_, P>,
    other: ImgRef<'_, P>,
) -> Result<(), FilterError> {
    check_dims(other.width(), other.height(), acc.width(), acc.height())?;
    for (a, o) in acc.rows_mut().zip(other.rows()) {
        filter.apply_inplace(pixel_bytes_mut(a)?, pixel_bytes(o)?)?;
    }
    Ok(())
}

/// Run a [`ByteFilter`] over every row of `src`, writing `dst`.
pub fn byte_filter<P: Pod>(
    filter: ByteFilter,
    src: ImgRef<'_, P>,
    mut dst: ImgRefMut<'_, P>,
) -> Result<(), FilterError> {
    check_dims(src.width(), src.height(), dst.width(), dst.height())?;
    for (s, d) in src.rows().zip(dst.rows_mut()) {
        filter.apply(pixel_bytes(s)?, pixel_bytes_mut(d)?)?;
    }
    Ok(())
}

/// Run a [`ByteFilter`] over every row of `img` in place.
pub fn byte_filter_inplace<P: Pod>(
    filter: ByteFilter,
    mut img: ImgRefMut<'_, P>,
) -> Result<(), FilterError> {
    for row in img.rows_mut() {
        filter.apply_inplace(pixel_bytes_mut(row)?)?;
    }
    Ok(())
}

/// Run a [`UnitFilter`] with one pixel per unit, writing `dst`.
pub fn unit_filter<P: Pod>(
    filter: UnitFilter,
    src: ImgRef<'_, P>,
    mut dst: ImgRefMut<'_, P>,
) -> Result<(), FilterError> {
    check_dims(src.width(), src.height(), dst.width(), dst.height())?;
    for (s, d) in src.rows().zip(dst.rows_mut()) {
        filter.apply(pixel_bytes(s)?, pixel_bytes_mut(d)?, size_of::<P>())?;
    }
    Ok(())
}

/// Run a [`UnitFilter`] with one pixel per unit, in place.
pub fn unit_filter_inplace<P: Pod>(
    filter: UnitFilter,
    mut img: ImgRefMut<'_, P>,
) -> Result<(), FilterError> {
    for row in img.rows_mut() {
        filter.apply_inplace(pixel_bytes_mut(row)?, size_of::<P>())?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Neighborhood filters
// ---------------------------------------------------------------------------

/// Convolve a single-channel image, with `rows = height` and
/// `columns = width`.
///
/// Validates like [`crate::convolve`] and fails the same way.
pub fn convolve(
    src: ImgRef<'_, u8>,
    dst: ImgRefMut<'_, u8>,
    kernel: &[i16],
    size: KernelSize,
    norm: Normalization,
) -> Result<(), FilterError> {
    check_dims(src.width(), src.height(), dst.width(), dst.height())?;
    let samples = src.width() * src.height();
    crate::neighborhood::check_convolve(
        samples,
        samples,
        src.height(),
        src.width(),
        kernel,
        size,
        norm,
    )?;
    Err(FilterError::NotImplemented)
}

/// Sobel-X over a single-channel image.
pub fn sobel_x(src: ImgRef<'_, u8>, dst: ImgRefMut<'_, u8>) -> Result<(), FilterError> {
    check_dims(src.width(), src.height(), dst.width(), dst.height())?;
    let samples = src.width() * src.height();
    crate::neighborhood::check_sobel(samples, samples, src.height(), src.width())?;
    Err(FilterError::NotImplemented)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
