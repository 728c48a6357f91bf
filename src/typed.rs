//! Filters over typed pixel slices, reinterpreted as bytes via bytemuck.
//!
//! Any [`bytemuck::Pod`] pixel works. For the unit filters one pixel is one
//! unit: `bpp = size_of::<P>()`, and a constant pixel is laid over each pixel
//! byte for byte in memory order.
//!
//! ```rust
//! use rgb::Rgba;
//! use bytefilter::typed;
//!
//! let src = vec![Rgba::new(250u8, 10, 128, 255); 4];
//! let mut dst = vec![Rgba::default(); 4];
//! typed::add_rgba(&src, &mut dst, Rgba::new(10, 10, 0, 0)).unwrap();
//! assert_eq!(dst[0], Rgba::new(255, 20, 128, 255));
//! ```
//!
//! The byte-wise families run on the raw bytes of any pixel type:
//!
//! ```rust
//! use rgb::Rgb;
//! use bytefilter::{ByteFilter, typed};
//!
//! let mut pixels = vec![Rgb::new(0u8, 100, 255); 3];
//! typed::byte_pixels_inplace(ByteFilter::BitNegation, &mut pixels).unwrap();
//! assert_eq!(pixels[0], Rgb::new(255, 155, 0));
//! ```

use bytemuck::Pod;
use rgb::{Rgb, Rgba};

use crate::{ByteFilter, DualFilter, FilterError, UnitFilter, check_len};

// ---------------------------------------------------------------------------
// Byte views
// ---------------------------------------------------------------------------

/// Zero-sized pixels have no bytes to filter and fail here.
#[inline]
pub(crate) fn pixel_bytes<P: Pod>(pixels: &[P]) -> Result<&[u8], FilterError> {
    bytemuck::try_cast_slice(pixels).map_err(|_| FilterError::BppOutOfRange)
}

#[inline]
pub(crate) fn pixel_bytes_mut<P: Pod>(pixels: &mut [P]) -> Result<&mut [u8], FilterError> {
    bytemuck::try_cast_slice_mut(pixels).map_err(|_| FilterError::BppOutOfRange)
}

/// A pixel's bytes in memory order, read as a big-endian constant.
#[inline]
pub(crate) fn pixel_constant<P: Pod>(c: &P) -> u128 {
    bytemuck::bytes_of(c)
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b))
}

// ---------------------------------------------------------------------------
// Generic pixel filters
// ---------------------------------------------------------------------------

/// Add `c` to every pixel, each byte saturating at 255.
///
/// Pixels wider than [`MAX_BYTES_PER_PIXEL`](crate::MAX_BYTES_PER_PIXEL) fail
/// with [`FilterError::BppOutOfRange`].
pub fn add_pixel<P: Pod>(src: &[P], dst: &mut [P], c: P) -> Result<(), FilterError> {
    unit_pixels(UnitFilter::AddUint(pixel_constant(&c)), src, dst)
}

/// Subtract `c` from every pixel, each byte saturating at 0.
pub fn sub_pixel<P: Pod>(src: &[P], dst: &mut [P], c: P) -> Result<(), FilterError> {
    unit_pixels(UnitFilter::SubUint(pixel_constant(&c)), src, dst)
}

/// [`add_pixel`] with `pixels` as both source and destination.
pub fn add_pixel_inplace<P: Pod>(pixels: &mut [P], c: P) -> Result<(), FilterError> {
    unit_pixels_inplace(UnitFilter::AddUint(pixel_constant(&c)), pixels)
}

/// [`sub_pixel`] with `pixels` as both source and destination.
pub fn sub_pixel_inplace<P: Pod>(pixels: &mut [P], c: P) -> Result<(), FilterError> {
    unit_pixels_inplace(UnitFilter::SubUint(pixel_constant(&c)), pixels)
}

/// Run a [`UnitFilter`] with one pixel per unit.
pub fn unit_pixels<P: Pod>(filter: UnitFilter, src: &[P], dst: &mut [P]) -> Result<(), FilterError> {
    check_len(src.len(), dst.len())?;
    let s = pixel_bytes(src)?;
    let d = pixel_bytes_mut(dst)?;
    filter.apply(s, d, size_of::<P>())
}

/// [`unit_pixels`] over a single buffer.
pub fn unit_pixels_inplace<P: Pod>(filter: UnitFilter, pixels: &mut [P]) -> Result<(), FilterError> {
    let bytes = pixel_bytes_mut(pixels)?;
    filter.apply_inplace(bytes, size_of::<P>())
}

/// Run a [`DualFilter`] over the raw bytes of two pixel slices.
pub fn dual_pixels<P: Pod>(
    filter: DualFilter,
    src1: &[P],
    src2: &[P],
    dst: &mut [P],
) -> Result<(), FilterError> {
    filter.apply(pixel_bytes(src1)?, pixel_bytes(src2)?, pixel_bytes_mut(dst)?)
}

/// [`dual_pixels`] accumulating into `acc`.
pub fn dual_pixels_inplace<P: Pod>(
    filter: DualFilter,
    acc: &mut [P],
    other: &[P],
) -> Result<(), FilterError> {
    filter.apply_inplace(pixel_bytes_mut(acc)?, pixel_bytes(other)?)
}

/// Run a [`ByteFilter`] over the raw bytes of a pixel slice.
pub fn byte_pixels<P: Pod>(filter: ByteFilter, src: &[P], dst: &mut [P]) -> Result<(), FilterError> {
    filter.apply(pixel_bytes(src)?, pixel_bytes_mut(dst)?)
}

/// [`byte_pixels`] over a single buffer.
pub fn byte_pixels_inplace<P: Pod>(filter: ByteFilter, pixels: &mut [P]) -> Result<(), FilterError> {
    filter.apply_inplace(pixel_bytes_mut(pixels)?)
}

// ---------------------------------------------------------------------------
// rgb convenience wrappers
// ---------------------------------------------------------------------------

/// Add a color to every RGBA pixel, per channel, saturating.
pub fn add_rgba(src: &[Rgba<u8>], dst: &mut [Rgba<u8>], c: Rgba<u8>) -> Result<(), FilterError> {
    add_pixel(src, dst, c)
}

/// Subtract a color from every RGBA pixel, per channel, saturating.
pub fn sub_rgba(src: &[Rgba<u8>], dst: &mut [Rgba<u8>], c: Rgba<u8>) -> Result<(), FilterError> {
    sub_pixel(src, dst, c)
}

/// Add a color to every RGB pixel, per channel, saturating.
pub fn add_rgb(src: &[Rgb<u8>], dst: &mut [Rgb<u8>], c: Rgb<u8>) -> Result<(), FilterError> {
    add_pixel(src, dst, c)
}

/// Subtract a color from every RGB pixel, per channel, saturating.
pub fn sub_rgb(src: &[Rgb<u8>], dst: &mut [Rgb<u8>], c: Rgb<u8>) -> Result<(), FilterError> {
    sub_pixel(src, dst, c)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
