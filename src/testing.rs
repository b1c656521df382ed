//! Testing utilities for constrained values
//!
//! Assertion macros check a value against the predicate of a constrained
//! type without constructing it, so no policy fires:
//!
//! ```rust
//! use constrained_value::constant::Int;
//! use constrained_value::{assert_admits, assert_rejects, Bounded};
//!
//! type Percent = Bounded<i32, Int<0>, Int<100>>;
//!
//! assert_admits!(Percent, 100);
//! assert_rejects!(Percent, 101);
//! ```
//!
//! With the `proptest` feature, strategies for finite floating-point values
//! and an `Arbitrary` impl for [`UlpOffset`](crate::ulp::UlpOffset) are
//! available for property tests.

/// Assert that the constrained type `$ty` accepts `$value`.
///
/// # Example
///
/// ```rust
/// use constrained_value::{assert_admits, Positive};
///
/// type Rate = Positive<f64>;
/// assert_admits!(Rate, 0.5);
/// ```
#[macro_export]
macro_rules! assert_admits {
    ($ty:ty, $value:expr) => {
        match &$value {
            value => {
                if !<$ty>::is_valid(value) {
                    panic!("Expected {} to admit {:?}", stringify!($ty), value);
                }
            }
        }
    };
}

/// Assert that the constrained type `$ty` rejects `$value`.
///
/// # Example
///
/// ```rust
/// use constrained_value::{assert_rejects, Positive};
///
/// type Rate = Positive<f64>;
/// assert_rejects!(Rate, -0.0);
/// ```
#[macro_export]
macro_rules! assert_rejects {
    ($ty:ty, $value:expr) => {
        match &$value {
            value => {
                if <$ty>::is_valid(value) {
                    panic!("Expected {} to reject {:?}", stringify!($ty), value);
                }
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::{any, Arbitrary, BoxedStrategy, Strategy};

#[cfg(feature = "proptest")]
use crate::ulp::UlpOffset;

/// Any finite `f64`: normal, subnormal or zero, of either sign.
#[cfg(feature = "proptest")]
pub fn finite_f64() -> impl Strategy<Value = f64> {
    use proptest::num::f64;

    f64::POSITIVE | f64::NEGATIVE | f64::NORMAL | f64::SUBNORMAL | f64::ZERO
}

/// Any finite `f32`: normal, subnormal or zero, of either sign.
#[cfg(feature = "proptest")]
pub fn finite_f32() -> impl Strategy<Value = f32> {
    use proptest::num::f32;

    f32::POSITIVE | f32::NEGATIVE | f32::NORMAL | f32::SUBNORMAL | f32::ZERO
}

// Offsets stay within i32 so stepping a typical f64 stays finite.
#[cfg(feature = "proptest")]
impl Arbitrary for UlpOffset {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        any::<i32>()
            .prop_map(|steps| UlpOffset::new(i64::from(steps)))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::constant::Int;
    use crate::policy::Reject;
    use crate::{Negative, StrictlyBounded};

    type Open = StrictlyBounded<f64, Int<0>, Int<1>, Reject>;
    type NegativeI64 = Negative<i64>;

    #[test]
    fn assert_admits_macro() {
        assert_admits!(Open, 0.5);
        assert_admits!(NegativeI64, -1);
    }

    #[test]
    fn assert_rejects_macro() {
        assert_rejects!(Open, 1.0);
        assert_rejects!(NegativeI64, 0);
    }

    #[test]
    #[should_panic(expected = "Expected Open to admit 1.0")]
    fn assert_admits_panics_on_rejection() {
        assert_admits!(Open, 1.0);
    }

    #[test]
    #[should_panic(expected = "Expected NegativeI64 to reject -3")]
    fn assert_rejects_panics_on_admission() {
        assert_rejects!(NegativeI64, -3);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::super::*;
        use crate::math::is_finite;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn finite_strategies_generate_finite_values(x in finite_f64(), y in finite_f32()) {
                prop_assert!(is_finite(x));
                prop_assert!(is_finite(y));
            }

            #[test]
            fn ulp_offset_arbitrary_fits_i32(offset in any::<UlpOffset>()) {
                prop_assert!(i32::try_from(offset.steps()).is_ok());
            }
        }
    }
}
