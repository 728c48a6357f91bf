use core::arch::aarch64::{
    vabdq_u8, vandq_u8, vcgeq_u8, vdupq_n_u8, vmaxq_u8, vminq_u8, vmvnq_u8, vorrq_u8, vqaddq_u8,
    vqsubq_u8,
};

use archmage::prelude::*;
use safe_unaligned_simd::aarch64::{vld1q_u8, vst1q_u8};

use super::{clip_u8, map1, map2, threshold_u8};

// ===========================================================================
// ARM NEON: rite row implementations (dual source)
// ===========================================================================

#[rite]
pub(super) fn add_row_arm_v2(_token: Arm64V2Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = vld1q_u8(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = vld1q_u8(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vqaddq_u8(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::saturating_add);
}

#[rite]
pub(super) fn sub_row_arm_v2(_token: Arm64V2Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = vld1q_u8(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = vld1q_u8(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vqsubq_u8(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::saturating_sub);
}

#[rite]
pub(super) fn abs_diff_row_arm_v2(_token: Arm64V2Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = vld1q_u8(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = vld1q_u8(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vabdq_u8(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::abs_diff);
}

#[rite]
pub(super) fn and_row_arm_v2(_token: Arm64V2Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = vld1q_u8(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = vld1q_u8(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vandq_u8(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], |x, y| x & y);
}

#[rite]
pub(super) fn or_row_arm_v2(_token: Arm64V2Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = vld1q_u8(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = vld1q_u8(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vorrq_u8(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], |x, y| x | y);
}

// ===========================================================================
// ARM NEON: rite row implementations (single source)
// ===========================================================================

#[rite]
pub(super) fn not_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = vld1q_u8(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vmvnq_u8(v));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| !s);
}

#[rite]
pub(super) fn add_const_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], c: u8) {
    let vc = vdupq_n_u8(c);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = vld1q_u8(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vqaddq_u8(v, vc));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| s.saturating_add(c));
}

#[rite]
pub(super) fn sub_const_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], c: u8) {
    let vc = vdupq_n_u8(c);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = vld1q_u8(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vqsubq_u8(v, vc));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| s.saturating_sub(c));
}

#[rite]
pub(super) fn clip_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], lo: u8, hi: u8) {
    let vlo = vdupq_n_u8(lo);
    let vhi = vdupq_n_u8(hi);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = vld1q_u8(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vminq_u8(vmaxq_u8(v, vlo), vhi));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| clip_u8(s, lo, hi));
}

#[rite]
pub(super) fn threshold_row_arm_v2(_token: Arm64V2Token, src: &[u8], dst: &mut [u8], t: u8) {
    let vt = vdupq_n_u8(t);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = vld1q_u8(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(out, vcgeq_u8(v, vt));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| threshold_u8(s, t));
}

// ===========================================================================
// ARM arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn add_impl_arm_v2(t: Arm64V2Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    add_row_arm_v2(t, a, b, d);
}
#[arcane]
pub(super) fn sub_impl_arm_v2(t: Arm64V2Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    sub_row_arm_v2(t, a, b, d);
}
#[arcane]
pub(super) fn abs_diff_impl_arm_v2(t: Arm64V2Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    abs_diff_row_arm_v2(t, a, b, d);
}
#[arcane]
pub(super) fn and_impl_arm_v2(t: Arm64V2Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    and_row_arm_v2(t, a, b, d);
}
#[arcane]
pub(super) fn or_impl_arm_v2(t: Arm64V2Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    or_row_arm_v2(t, a, b, d);
}
#[arcane]
pub(super) fn not_impl_arm_v2(t: Arm64V2Token, s: &[u8], d: &mut [u8]) {
    not_row_arm_v2(t, s, d);
}
#[arcane]
pub(super) fn add_const_impl_arm_v2(t: Arm64V2Token, s: &[u8], d: &mut [u8], c: u8) {
    add_const_row_arm_v2(t, s, d, c);
}
#[arcane]
pub(super) fn sub_const_impl_arm_v2(t: Arm64V2Token, s: &[u8], d: &mut [u8], c: u8) {
    sub_const_row_arm_v2(t, s, d, c);
}
#[arcane]
pub(super) fn clip_impl_arm_v2(t: Arm64V2Token, s: &[u8], d: &mut [u8], lo: u8, hi: u8) {
    clip_row_arm_v2(t, s, d, lo, hi);
}
#[arcane]
pub(super) fn threshold_impl_arm_v2(t: Arm64V2Token, s: &[u8], d: &mut [u8], th: u8) {
    threshold_row_arm_v2(t, s, d, th);
}
