extern crate alloc;
extern crate std;
use super::*;
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

// --- Helpers to generate test data ---

fn ramp(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i * 7 % 256) as u8).collect()
}

fn ramp_rev(n: usize) -> Vec<u8> {
    (0..n).map(|i| (255 - (i * 13 % 256)) as u8).collect()
}

// --- Reference implementations for comparison ---

fn ref_dual(a: &[u8], b: &[u8], f: impl Fn(u8, u8) -> u8) -> Vec<u8> {
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

fn ref_single(src: &[u8], f: impl Fn(u8) -> u8) -> Vec<u8> {
    src.iter().map(|&s| f(s)).collect()
}

// Small (tail only), vector-width boundaries for 16 and 32 lanes, multi-chunk.
const TEST_LENS: &[usize] = &[0, 1, 2, 15, 16, 17, 31, 32, 33, 63, 64, 65, 100, 257];

// -----------------------------------------------------------------------
// Dual-source kernels, tested at every capability tier
// -----------------------------------------------------------------------

fn check_dual(
    name: &str,
    kernel: fn(&[u8], &[u8], &mut [u8]),
    reference: fn(u8, u8) -> u8,
) {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENS {
            let a = ramp(n);
            let b = ramp_rev(n);
            let expected = ref_dual(&a, &b, reference);
            let mut dst = vec![0u8; n];
            kernel(&a, &b, &mut dst);
            assert_eq!(dst, expected, "{name} n={n} tier={perm}");
        }
    });
    std::eprintln!("{name}: {report}");
}

#[test]
fn permutation_add() {
    check_dual("add", add, u8::saturating_add);
}

#[test]
fn permutation_sub() {
    check_dual("sub", sub, u8::saturating_sub);
}

#[test]
fn permutation_abs_diff() {
    check_dual("abs_diff", abs_diff, u8::abs_diff);
}

#[test]
fn permutation_and() {
    check_dual("and", and, |x, y| x & y);
}

#[test]
fn permutation_or() {
    check_dual("or", or, |x, y| x | y);
}

// -----------------------------------------------------------------------
// Single-source kernels
// -----------------------------------------------------------------------

#[test]
fn permutation_not() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENS {
            let src = ramp(n);
            let expected = ref_single(&src, |s| !s);
            let mut dst = vec![0u8; n];
            not(&src, &mut dst);
            assert_eq!(dst, expected, "not n={n} tier={perm}");
        }
    });
    std::eprintln!("not: {report}");
}

#[test]
fn permutation_add_const() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENS {
            for c in [1u8, 37, 200, 255] {
                let src = ramp(n);
                let expected = ref_single(&src, |s| s.saturating_add(c));
                let mut dst = vec![0u8; n];
                add_const(&src, &mut dst, c);
                assert_eq!(dst, expected, "add_const c={c} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("add_const: {report}");
}

#[test]
fn permutation_sub_const() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENS {
            for c in [1u8, 37, 200, 255] {
                let src = ramp(n);
                let expected = ref_single(&src, |s| s.saturating_sub(c));
                let mut dst = vec![0u8; n];
                sub_const(&src, &mut dst, c);
                assert_eq!(dst, expected, "sub_const c={c} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("sub_const: {report}");
}

#[test]
fn permutation_clip() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENS {
            for (lo, hi) in [(10u8, 200u8), (0, 0), (128, 128), (0, 254), (1, 255)] {
                let src = ramp(n);
                let expected = ref_single(&src, |s| {
                    if s < lo {
                        lo
                    } else if s > hi {
                        hi
                    } else {
                        s
                    }
                });
                let mut dst = vec![0u8; n];
                clip(&src, &mut dst, lo, hi);
                assert_eq!(dst, expected, "clip {lo}..={hi} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("clip: {report}");
}

#[test]
fn permutation_threshold() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_LENS {
            for t in [0u8, 1, 100, 128, 255] {
                let src = ramp(n);
                let expected = ref_single(&src, |s| if s >= t { 255 } else { 0 });
                let mut dst = vec![0u8; n];
                threshold(&src, &mut dst, t);
                assert_eq!(dst, expected, "threshold t={t} n={n} tier={perm}");
            }
        }
    });
    std::eprintln!("threshold: {report}");
}

#[test]
fn threshold_high_bytes_compare_unsigned() {
    // Bytes >= 0x80 must not be treated as negative by the vector compare.
    let src: Vec<u8> = (0..64).map(|i| 0x70 + i as u8).collect();
    let mut dst = vec![0u8; 64];
    threshold(&src, &mut dst, 0x90);
    for (s, d) in src.iter().zip(&dst) {
        assert_eq!(*d, if *s >= 0x90 { 255 } else { 0 }, "s={s}");
    }
}
