use core::arch::wasm32::{
    u8x16_add_sat, u8x16_ge, u8x16_max, u8x16_min, u8x16_splat, u8x16_sub_sat, v128_and, v128_not,
    v128_or,
};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::{clip_u8, map1, map2, threshold_u8};

// ===========================================================================
// WASM SIMD128: rite row implementations (dual source)
// ===========================================================================

#[rite]
pub(super) fn add_row_wasm128(_token: Wasm128Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = v128_load(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = v128_load(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, u8x16_add_sat(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::saturating_add);
}

#[rite]
pub(super) fn sub_row_wasm128(_token: Wasm128Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = v128_load(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = v128_load(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, u8x16_sub_sat(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::saturating_sub);
}

#[rite]
pub(super) fn abs_diff_row_wasm128(_token: Wasm128Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = v128_load(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = v128_load(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let diff = v128_or(u8x16_sub_sat(va, vb), u8x16_sub_sat(vb, va));
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, diff);
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], u8::abs_diff);
}

#[rite]
pub(super) fn and_row_wasm128(_token: Wasm128Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = v128_load(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = v128_load(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, v128_and(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], |x, y| x & y);
}

#[rite]
pub(super) fn or_row_wasm128(_token: Wasm128Token, a: &[u8], b: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let va = v128_load(<&[u8; 16]>::try_from(&a[i..i + 16]).unwrap());
        let vb = v128_load(<&[u8; 16]>::try_from(&b[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, v128_or(va, vb));
        i += 16;
    }
    map2(&a[i..], &b[i..], &mut dst[i..], |x, y| x | y);
}

// ===========================================================================
// WASM SIMD128: rite row implementations (single source)
// ===========================================================================

#[rite]
pub(super) fn not_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8]) {
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = v128_load(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, v128_not(v));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| !s);
}

#[rite]
pub(super) fn add_const_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8], c: u8) {
    let vc = u8x16_splat(c);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = v128_load(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, u8x16_add_sat(v, vc));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| s.saturating_add(c));
}

#[rite]
pub(super) fn sub_const_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8], c: u8) {
    let vc = u8x16_splat(c);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = v128_load(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, u8x16_sub_sat(v, vc));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| s.saturating_sub(c));
}

#[rite]
pub(super) fn clip_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8], lo: u8, hi: u8) {
    let vlo = u8x16_splat(lo);
    let vhi = u8x16_splat(hi);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = v128_load(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, u8x16_min(u8x16_max(v, vlo), vhi));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| clip_u8(s, lo, hi));
}

#[rite]
pub(super) fn threshold_row_wasm128(_token: Wasm128Token, src: &[u8], dst: &mut [u8], t: u8) {
    let vt = u8x16_splat(t);
    let n = dst.len();
    let mut i = 0;
    while i + 16 <= n {
        let v = v128_load(<&[u8; 16]>::try_from(&src[i..i + 16]).unwrap());
        let out: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(out, u8x16_ge(v, vt));
        i += 16;
    }
    map1(&src[i..], &mut dst[i..], |s| threshold_u8(s, t));
}

// ===========================================================================
// WASM arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn add_impl_wasm128(t: Wasm128Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    add_row_wasm128(t, a, b, d);
}
#[arcane]
pub(super) fn sub_impl_wasm128(t: Wasm128Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    sub_row_wasm128(t, a, b, d);
}
#[arcane]
pub(super) fn abs_diff_impl_wasm128(t: Wasm128Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    abs_diff_row_wasm128(t, a, b, d);
}
#[arcane]
pub(super) fn and_impl_wasm128(t: Wasm128Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    and_row_wasm128(t, a, b, d);
}
#[arcane]
pub(super) fn or_impl_wasm128(t: Wasm128Token, a: &[u8], b: &[u8], d: &mut [u8]) {
    or_row_wasm128(t, a, b, d);
}
#[arcane]
pub(super) fn not_impl_wasm128(t: Wasm128Token, s: &[u8], d: &mut [u8]) {
    not_row_wasm128(t, s, d);
}
#[arcane]
pub(super) fn add_const_impl_wasm128(t: Wasm128Token, s: &[u8], d: &mut [u8], c: u8) {
    add_const_row_wasm128(t, s, d, c);
}
#[arcane]
pub(super) fn sub_const_impl_wasm128(t: Wasm128Token, s: &[u8], d: &mut [u8], c: u8) {
    sub_const_row_wasm128(t, s, d, c);
}
#[arcane]
pub(super) fn clip_impl_wasm128(t: Wasm128Token, s: &[u8], d: &mut [u8], lo: u8, hi: u8) {
    clip_row_wasm128(t, s, d, lo, hi);
}
#[arcane]
pub(super) fn threshold_impl_wasm128(t: Wasm128Token, s: &[u8], d: &mut [u8], th: u8) {
    threshold_row_wasm128(t, s, d, th);
}
