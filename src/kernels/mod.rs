// ---------------------------------------------------------------------------
// Byte kernels with SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops, #[arcane]
// wrappers are the incant! dispatch targets. Callers validate lengths; every
// kernel here assumes all slices share the destination length.
// ---------------------------------------------------------------------------

use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;

#[cfg(test)]
mod tests;

// ===========================================================================
// Per-byte operations, shared by the scalar tier and the SIMD tails
// ===========================================================================

#[inline(always)]
fn map1(src: &[u8], dst: &mut [u8], f: impl Fn(u8) -> u8) {
    for (&s, d) in src.iter().zip(dst.iter_mut()) {
        *d = f(s);
    }
}

#[inline(always)]
fn map2(a: &[u8], b: &[u8], dst: &mut [u8], f: impl Fn(u8, u8) -> u8) {
    for ((&x, &y), d) in a.iter().zip(b).zip(dst.iter_mut()) {
        *d = f(x, y);
    }
}

#[inline(always)]
fn threshold_u8(s: u8, t: u8) -> u8 {
    if s >= t { 0xFF } else { 0 }
}

#[inline(always)]
fn clip_u8(s: u8, lo: u8, hi: u8) -> u8 {
    s.max(lo).min(hi)
}

// ===========================================================================
// Dispatch, dual source
// ===========================================================================

pub(crate) fn add(a: &[u8], b: &[u8], dst: &mut [u8]) {
    incant!(add_impl(a, b, dst), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn sub(a: &[u8], b: &[u8], dst: &mut [u8]) {
    incant!(sub_impl(a, b, dst), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn abs_diff(a: &[u8], b: &[u8], dst: &mut [u8]) {
    incant!(abs_diff_impl(a, b, dst), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn and(a: &[u8], b: &[u8], dst: &mut [u8]) {
    incant!(and_impl(a, b, dst), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn or(a: &[u8], b: &[u8], dst: &mut [u8]) {
    incant!(or_impl(a, b, dst), [v3, arm_v2, wasm128, scalar]);
}

// ===========================================================================
// Dispatch, single source
// ===========================================================================

pub(crate) fn not(src: &[u8], dst: &mut [u8]) {
    incant!(not_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn add_const(src: &[u8], dst: &mut [u8], c: u8) {
    incant!(add_const_impl(src, dst, c), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn sub_const(src: &[u8], dst: &mut [u8], c: u8) {
    incant!(sub_const_impl(src, dst, c), [v3, arm_v2, wasm128, scalar]);
}

/// `lo <= hi` is required; inverted ranges are handled by the caller.
pub(crate) fn clip(src: &[u8], dst: &mut [u8], lo: u8, hi: u8) {
    debug_assert!(lo <= hi);
    incant!(clip_impl(src, dst, lo, hi), [v3, arm_v2, wasm128, scalar]);
}

pub(crate) fn threshold(src: &[u8], dst: &mut [u8], t: u8) {
    incant!(threshold_impl(src, dst, t), [v3, arm_v2, wasm128, scalar]);
}
