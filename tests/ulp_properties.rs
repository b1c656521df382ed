//! Property-based tests for ULP arithmetic and tolerance predicates

use constrained_value::math::{signbit, signum};
use constrained_value::predicate::{near, Absolute, Predicate};
use constrained_value::ulp::{step_by_ulps, ulp_distance, UlpOffset};
use proptest::prelude::*;

fn finite() -> impl Strategy<Value = f64> {
    use proptest::num::f64;

    f64::POSITIVE | f64::NEGATIVE | f64::NORMAL | f64::SUBNORMAL | f64::ZERO
}

// Keeps a +/- steps walk inside the finite range.
fn moderate() -> impl Strategy<Value = f64> {
    -1.0e300..1.0e300_f64
}

// Across zero the distance is the sum of both magnitudes' bit patterns.
fn distance_fits(a: f64, b: f64) -> bool {
    (a.abs().to_bits() as i64)
        .checked_add(b.abs().to_bits() as i64)
        .is_some()
}

proptest! {
    #[test]
    fn prop_distance_to_self_is_zero(a in finite()) {
        prop_assert_eq!(ulp_distance(a, a), 0);
        prop_assert_eq!(ulp_distance(a, -(-a)), 0);
    }

    #[test]
    fn prop_distance_is_antisymmetric(a in finite(), b in finite()) {
        prop_assume!(distance_fits(a, b));
        prop_assert_eq!(ulp_distance(a, b), -ulp_distance(b, a));
    }

    #[test]
    fn prop_distance_sign_follows_order(a in finite(), b in finite()) {
        prop_assume!(distance_fits(a, b));
        prop_assert_eq!(ulp_distance(a, b).signum(), signum::<i64, f64>(b, a));
    }

    #[test]
    fn prop_step_then_measure(x in moderate(), steps in -1_000_000_i64..1_000_000) {
        let stepped = step_by_ulps(x, steps);
        prop_assert_eq!(ulp_distance(x, stepped), steps);
    }

    #[test]
    fn prop_offset_round_trip(x in moderate(), offset in -1_000_000_i64..1_000_000) {
        let offset = UlpOffset::new(offset);
        let back = (x + offset) - offset;
        prop_assert_eq!(ulp_distance(x, back), 0);
        if x != 0.0 {
            prop_assert_eq!(back.to_bits(), x.to_bits());
        }
    }

    #[test]
    fn prop_single_step_matches_next_up(x in moderate()) {
        prop_assert_eq!(x + UlpOffset::new(1), x.next_up());
        prop_assert_eq!(x - UlpOffset::new(1), x.next_down());
    }

    #[test]
    fn prop_signbit_matches_std(x in any::<f64>()) {
        prop_assert_eq!(signbit(x), x.is_sign_negative());
    }

    #[test]
    fn prop_near_in_ulps_is_boundary_exact(r in moderate(), n in 0_i64..1_000) {
        let predicate = near(r, UlpOffset::new(n));
        let hi = r + UlpOffset::new(n);
        let lo = r - UlpOffset::new(n);

        prop_assert!(predicate.test(&hi));
        prop_assert!(predicate.test(&lo));
        prop_assert!(!predicate.test(&hi.next_up()));
        prop_assert!(!predicate.test(&lo.next_down()));
    }

    #[test]
    fn prop_near_absolute_is_boundary_exact(r in -1.0e6..1.0e6_f64, tol in 0.0..1.0e3_f64) {
        let predicate = near(r, Absolute(tol));
        let (lo, hi) = (r - tol, r + tol);

        prop_assert!(predicate.test(&lo));
        prop_assert!(predicate.test(&hi));
        prop_assert!(!predicate.test(&hi.next_up()));
        prop_assert!(!predicate.test(&lo.next_down()));
    }
}
