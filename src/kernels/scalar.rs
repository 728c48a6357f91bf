use archmage::prelude::*;

use super::{clip_u8, map1, map2, threshold_u8};

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn add_row_scalar(_token: ScalarToken, a: &[u8], b: &[u8], dst: &mut [u8]) {
    map2(a, b, dst, u8::saturating_add);
}

pub(super) fn sub_row_scalar(_token: ScalarToken, a: &[u8], b: &[u8], dst: &mut [u8]) {
    map2(a, b, dst, u8::saturating_sub);
}

pub(super) fn abs_diff_row_scalar(_token: ScalarToken, a: &[u8], b: &[u8], dst: &mut [u8]) {
    map2(a, b, dst, u8::abs_diff);
}

pub(super) fn and_row_scalar(_token: ScalarToken, a: &[u8], b: &[u8], dst: &mut [u8]) {
    map2(a, b, dst, |x, y| x & y);
}

pub(super) fn or_row_scalar(_token: ScalarToken, a: &[u8], b: &[u8], dst: &mut [u8]) {
    map2(a, b, dst, |x, y| x | y);
}

pub(super) fn not_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    map1(src, dst, |s| !s);
}

pub(super) fn add_const_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], c: u8) {
    map1(src, dst, |s| s.saturating_add(c));
}

pub(super) fn sub_const_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], c: u8) {
    map1(src, dst, |s| s.saturating_sub(c));
}

pub(super) fn clip_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], lo: u8, hi: u8) {
    map1(src, dst, |s| clip_u8(s, lo, hi));
}

pub(super) fn threshold_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8], t: u8) {
    map1(src, dst, |s| threshold_u8(s, t));
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn add_impl_scalar(t: ScalarToken, a: &[u8], b: &[u8], d: &mut [u8]) {
    add_row_scalar(t, a, b, d);
}
pub(super) fn sub_impl_scalar(t: ScalarToken, a: &[u8], b: &[u8], d: &mut [u8]) {
    sub_row_scalar(t, a, b, d);
}
pub(super) fn abs_diff_impl_scalar(t: ScalarToken, a: &[u8], b: &[u8], d: &mut [u8]) {
    abs_diff_row_scalar(t, a, b, d);
}
pub(super) fn and_impl_scalar(t: ScalarToken, a: &[u8], b: &[u8], d: &mut [u8]) {
    and_row_scalar(t, a, b, d);
}
pub(super) fn or_impl_scalar(t: ScalarToken, a: &[u8], b: &[u8], d: &mut [u8]) {
    or_row_scalar(t, a, b, d);
}
pub(super) fn not_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    not_row_scalar(t, s, d);
}
pub(super) fn add_const_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8], c: u8) {
    add_const_row_scalar(t, s, d, c);
}
pub(super) fn sub_const_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8], c: u8) {
    sub_const_row_scalar(t, s, d, c);
}
pub(super) fn clip_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8], lo: u8, hi: u8) {
    clip_row_scalar(t, s, d, lo, hi);
}
pub(super) fn threshold_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8], th: u8) {
    threshold_row_scalar(t, s, d, th);
}
