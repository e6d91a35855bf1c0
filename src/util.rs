use float_cmp::{approx_eq, F64Margin};
use num_complex::Complex64;

/// Margin for values produced by a handful of closed-form operations.
pub fn loose_margin() -> F64Margin {
    F64Margin {
        epsilon: 1e-9,
        ulps: 64,
    }
}

/// Relative closeness, `|a - b| <= rel * max(|a|, |b|)`. Equal infinities
/// compare equal.
pub fn rel_eq(a: f64, b: f64, rel: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= rel * a.abs().max(b.abs())
}

pub fn comp_c64(
    exemplar: &Complex64,
    calc: &Complex64,
    precision: F64Margin,
    test: &str,
    idx: &str,
) {
    comp_f64(
        &(exemplar.re),
        &(calc.re),
        precision,
        test,
        &(idx.to_owned() + ".re"),
    );
    comp_f64(
        &(exemplar.im),
        &(calc.im),
        precision,
        test,
        &(idx.to_owned() + ".im"),
    );
}

pub fn comp_f64(exemplar: &f64, calc: &f64, precision: F64Margin, test: &str, idx: &str) {
    assert!(
        approx_eq!(f64, *calc, *exemplar, precision),
        " Failed test {} at location {}\n  exemplar: {}\n      calc: {}",
        test,
        idx,
        exemplar,
        calc
    );
}

/// Like `comp_f64` but relative, for values spanning many decades.
pub fn comp_rel_f64(exemplar: &f64, calc: &f64, rel: f64, test: &str, idx: &str) {
    assert!(
        rel_eq(*exemplar, *calc, rel),
        " Failed test {} at location {}\n  exemplar: {}\n      calc: {}",
        test,
        idx,
        exemplar,
        calc
    );
}

#[cfg(test)]
mod util_tests {
    use super::*;

    #[test]
    fn test_rel_eq() {
        assert!(rel_eq(1.0, 1.0 + 1e-13, 1e-12));
        assert!(!rel_eq(1.0, 1.0 + 1e-11, 1e-12));
        assert!(rel_eq(f64::INFINITY, f64::INFINITY, 1e-12));
        assert!(!rel_eq(f64::INFINITY, 1e300, 1e-12));
        assert!(!rel_eq(f64::NAN, f64::NAN, 1e-12));
        assert!(rel_eq(0.0, -0.0, 1e-12));
    }
}
