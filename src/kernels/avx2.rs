use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::{clip_u8, map1, map2, threshold_u8};

// ===========================================================================
// x86-64 AVX2: rite row implementations (dual source)
// ===========================================================================

#[rite]
pub(super) fn add_row_v3(_token: X64V3Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let va = _mm256_loadu_si256(<&[u8; 32]>::try_from(&a[i..i + 32]).unwrap());
        let vb = _mm256_loadu_si256(<&[u8; 32]>::try_from(&b[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_adds_epu8(va, vb));
        i += 32;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::saturating_add);
}

#[rite]
pub(super) fn sub_row_v3(_token: X64V3Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let va = _mm256_loadu_si256(<&[u8; 32]>::try_from(&a[i..i + 32]).unwrap());
        let vb = _mm256_loadu_si256(<&[u8; 32]>::try_from(&b[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_subs_epu8(va, vb));
        i += 32;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::saturating_sub);
}

#[rite]
pub(super) fn abs_diff_row_v3(_token: X64V3Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let va = _mm256_loadu_si256(<&[u8; 32]>::try_from(&a[i..i + 32]).unwrap());
        let vb = _mm256_loadu_si256(<&[u8; 32]>::try_from(&b[i..i + 32]).unwrap());
        // One of the two saturating differences is always zero.
        let diff = _mm256_or_si256(_mm256_subs_epu8(va, vb), _mm256_subs_epu8(vb, va));
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, diff);
        i += 32;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::abs_diff);
}

#[rite]
pub(super) fn and_row_v3(_token: X64V3Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let va = _mm256_loadu_si256(<&[u8; 32]>::try_from(&a[i..i + 32]).unwrap());
        let vb = _mm256_loadu_si256(<&[u8; 32]>::try_from(&b[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_and_si256(va, vb));
        i += 32;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], |x, y| x & y);
}

#[rite]
pub(super) fn or_row_v3(_token: X64V3Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let va = _mm256_loadu_si256(<&[u8; 32]>::try_from(&a[i..i + 32]).unwrap());
        let vb = _mm256_loadu_si256(<&[u8; 32]>::try_from(&b[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_or_si256(va, vb));
        i += 32;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], |x, y| x | y);
}

// ===========================================================================
// x86-64 AVX2: rite row implementations (single source)
// ===========================================================================

#[rite]
pub(super) fn not_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let ones = _mm256_set1_epi8(-1);
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let v = _mm256_loadu_si256(<&[u8; 32]>::try_from(&src[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_xor_si256(v, ones));
        i += 32;
    }
    map1(&src[i..], &mut dst[i..], |s| !s);
}

#[rite]
pub(super) fn add_const_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], c: u8) {
    let vc = _mm256_set1_epi8(c as i8);
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let v = _mm256_loadu_si256(<&[u8; 32]>::try_from(&src[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_adds_epu8(v, vc));
        i += 32;
    }
    map1(&src[i..], &mut dst[i..], |s| s.saturating_add(c));
}

#[rite]
pub(super) fn sub_const_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], c: u8) {
    let vc = _mm256_set1_epi8(c as i8);
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let v = _mm256_loadu_si256(<&[u8; 32]>::try_from(&src[i..i + 32]).unwrap());
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_subs_epu8(v, vc));
        i += 32;
    }
    map1(&src[i..], &mut dst[i..], |s| s.saturating_sub(c));
}

#[rite]
pub(super) fn clip_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], lo: u8, hi: u8) {
    let vlo = _mm256_set1_epi8(lo as i8);
    let vhi = _mm256_set1_epi8(hi as i8);
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let v = _mm256_loadu_si256(<&[u8; 32]>::try_from(&src[i..i + 32]).unwrap());
        let clipped = _mm256_min_epu8(_mm256_max_epu8(v, vlo), vhi);
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, clipped);
        i += 32;
    }
    map1(&src[i..], &mut dst[i..], |s| clip_u8(s, lo, hi));
}

#[rite]
pub(super) fn threshold_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8], t: u8) {
    let vt = _mm256_set1_epi8(t as i8);
    let n = dst.len();
    let mut i = 0;
    while i + 32 <= n {
        let v = _mm256_loadu_si256(<&[u8; 32]>::try_from(&src[i..i + 32]).unwrap());
        // max(s, t) == s exactly when s >= t (unsigned)
        let mask = _mm256_cmpeq_epi8(_mm256_max_epu8(v, vt), v);
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, mask);
        i += 32;
    }
    map1(&src[i..], &mut dst[i..], |s| threshold_u8(s, t));
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn add_impl_v3(t: X64V3Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    add_row_v3(t, a, b, d);
}
#[arcane]
pub(super) fn sub_impl_v3(t: X64V3Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    sub_row_v3(t, a, b, d);
}
#[arcane]
pub(super) fn abs_diff_impl_v3(t: X64V3Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    abs_diff_row_v3(t, a, b, d);
}
#[arcane]
pub(super) fn and_impl_v3(t: X64V3Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    and_row_v3(t, a, b, d);
}
#[arcane]
pub(super) fn or_impl_v3(t: X64V3Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    or_row_v3(t, a, b, d);
}
#[arcane]
pub(super) fn not_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    not_row_v3(t, s, d);
}
#[arcane]
pub(super) fn add_const_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8], c: u8) {
    add_const_row_v3(t, s, d, c);
}
#[arcane]
pub(super) fn sub_const_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8], c: u8) {
    sub_const_row_v3(t, s, d, c);
}
#[arcane]
pub(super) fn clip_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8], lo: u8, hi: u8) {
    clip_row_v3(t, s, d, lo, hi);
}
#[arcane]
pub(super) fn threshold_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8], th: u8) {
    threshold_row_v3(t, s, d, th);
}
