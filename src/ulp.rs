//! ULP (unit in the last place) arithmetic
//!
//! [`ulp_distance`] counts the representable values between two finite
//! floating-point numbers. [`step_by_ulps`] and [`UlpOffset`] do the
//! reverse: move a value a given number of representable steps.
//!
//! Both work on the bit patterns of the magnitudes, which count up from zero
//! on either side of the sign, so crossing zero and the `+0.0`/`-0.0` pair
//! are handled exactly.
//!
//! # Example
//!
//! ```rust
//! use constrained_value::ulp::{ulp_distance, UlpOffset};
//!
//! let above = 1.0_f64 + UlpOffset::new(2);
//! assert_eq!(ulp_distance(1.0, above), 2);
//! assert_eq!(ulp_distance(above, 1.0), -2);
//! assert_eq!(ulp_distance(-0.0_f64, 0.0), 0);
//! ```

use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_traits::{CheckedAdd, CheckedNeg, NumCast};

use crate::math::{abs, is_finite, signbit, signum, Ieee754};

/// Signed number of representable steps from `a` to `b`.
///
/// Positive when `b > a`, negative when `b < a` and zero when they compare
/// equal, so `ulp_distance(a, b) == -ulp_distance(b, a)`.
///
/// # Panics
///
/// Panics if either argument is NaN or infinite, or if the distance does not
/// fit in `F::Bits` (only possible between values of opposite sign near the
/// ends of the finite range).
///
/// # Example
///
/// ```rust
/// use constrained_value::ulp::ulp_distance;
///
/// let mantissa_values = 1_i64 << (f64::MANTISSA_DIGITS - 1);
/// assert_eq!(ulp_distance(0.0, f64::MIN_POSITIVE), mantissa_values);
/// assert_eq!(ulp_distance(-f64::MIN_POSITIVE, f64::MIN_POSITIVE), 2 * mantissa_values);
/// ```
pub fn ulp_distance<F: Ieee754>(a: F, b: F) -> F::Bits {
    assert!(is_finite(a), "ulp_distance: first argument must be finite");
    assert!(is_finite(b), "ulp_distance: second argument must be finite");

    let x = abs(a).to_signed_bits();
    let y = abs(b).to_signed_bits();

    let distance = if signbit(a) == signbit(b) {
        abs(x - y)
    } else {
        match x.checked_add(&y) {
            Some(sum) => sum,
            None => panic!("ulp_distance: distance overflows {}", std::any::type_name::<F::Bits>()),
        }
    };

    signum::<F::Bits, F>(b, a) * distance
}

/// The value `steps` representable values away from `x`.
///
/// Positive `steps` move toward positive infinity and negative `steps`
/// toward negative infinity. Stepping crosses zero without visiting both
/// zeros: one step down from `+0.0` is the smallest negative subnormal.
///
/// # Panics
///
/// Panics if `x` is not finite, if `steps` does not fit in `F::Bits`, or if
/// the result would not be finite.
///
/// # Example
///
/// ```rust
/// use constrained_value::ulp::step_by_ulps;
///
/// assert_eq!(step_by_ulps(1.0_f64, 1), f64::from_bits(1.0_f64.to_bits() + 1));
/// assert_eq!(step_by_ulps(0.0_f64, -1), -f64::from_bits(1));
/// assert_eq!(step_by_ulps(f64::MAX, 0), f64::MAX);
/// ```
pub fn step_by_ulps<F: Ieee754>(x: F, steps: i64) -> F {
    let offset = match <F::Bits as NumCast>::from(steps) {
        Some(offset) => offset,
        None => panic!(
            "step_by_ulps: {} steps do not fit in {}",
            steps,
            std::any::type_name::<F::Bits>()
        ),
    };
    step_bits(x, offset)
}

const PAST_LOWEST: &str = "step_by_ulps: result is below the lowest finite value";
const PAST_LARGEST: &str = "step_by_ulps: result is above the largest finite value";

fn step_bits<F: Ieee754>(x: F, offset: F::Bits) -> F {
    assert!(is_finite(x), "step_by_ulps: value must be finite");

    if signbit(x) {
        let mirrored = match offset.checked_neg() {
            Some(mirrored) => mirrored,
            None => panic!("step_by_ulps: offset {} cannot be negated", offset),
        };
        // mirrored: leaving the top of the positive range means leaving the bottom
        return -step_non_negative(-x, mirrored, PAST_LARGEST, PAST_LOWEST);
    }

    step_non_negative(x, offset, PAST_LOWEST, PAST_LARGEST)
}

// `x` has a clear sign bit; the messages name the ends of the caller's range.
fn step_non_negative<F: Ieee754>(
    x: F,
    offset: F::Bits,
    past_lowest: &str,
    past_largest: &str,
) -> F {
    let to_zero = ulp_distance(x, F::zero());

    if offset < to_zero {
        let past_zero = offset - to_zero;
        let minus_zero = (-F::zero()).to_signed_bits();
        let lowest = F::lowest().to_signed_bits();

        // magnitudes of negative values count up from the bits of -0.0
        assert!(minus_zero - lowest <= past_zero, "{}", past_lowest);

        return F::from_signed_bits(minus_zero - past_zero);
    }

    let bits = x.to_signed_bits();
    let largest = F::max().to_signed_bits();
    assert!(offset <= largest - bits, "{}", past_largest);

    F::from_signed_bits(bits + offset)
}

/// A signed number of representable steps relative to a floating-point value.
///
/// Adding an offset to an `f32` or `f64` steps it that many representable
/// values; the resolution adapts to the magnitude of the value since ULP
/// spacing widens away from zero.
///
/// ```rust
/// use constrained_value::ulp::{ulp_distance, UlpOffset};
///
/// let two = UlpOffset::new(2);
/// assert_eq!(ulp_distance(1.0_f32, 1.0_f32 + two), 2);
/// assert_eq!(ulp_distance(1.0_f32, 1.0_f32 - two), -2);
/// assert_eq!(ulp_distance(0.0_f64, 0.0_f64 - UlpOffset::new(1)), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UlpOffset(i64);

impl UlpOffset {
    /// Create an offset of `steps` representable values.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is `i64::MIN`, which has no negation.
    pub const fn new(steps: i64) -> Self {
        assert!(steps != i64::MIN, "UlpOffset: i64::MIN steps cannot be negated");
        Self(steps)
    }

    /// Number of steps
    #[inline]
    pub const fn steps(self) -> i64 {
        self.0
    }

    /// Step `value` by this offset.
    ///
    /// See [`step_by_ulps`] for the panics.
    #[inline]
    pub fn apply<F: Ieee754>(self, value: F) -> F {
        step_by_ulps(value, self.0)
    }
}

impl Neg for UlpOffset {
    type Output = UlpOffset;

    fn neg(self) -> UlpOffset {
        UlpOffset(-self.0)
    }
}

impl fmt::Display for UlpOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ulp", self.0)
    }
}

macro_rules! impl_ulp_arithmetic {
    ($($float:ty),+) => {
        $(
            impl Add<UlpOffset> for $float {
                type Output = $float;

                #[inline]
                fn add(self, offset: UlpOffset) -> $float {
                    offset.apply(self)
                }
            }

            impl Sub<UlpOffset> for $float {
                type Output = $float;

                #[inline]
                fn sub(self, offset: UlpOffset) -> $float {
                    (-offset).apply(self)
                }
            }
        )+
    };
}

impl_ulp_arithmetic!(f32, f64);

/// Type-level ULP offset of `N` steps.
///
/// Usable as a zero-sized tolerance in [`Near`](crate::predicate::Near).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ulps<const N: i64>;

impl<const N: i64> Ulps<N> {
    /// The offset as a value
    pub const OFFSET: UlpOffset = UlpOffset::new(N);
}

impl<const N: i64> fmt::Debug for Ulps<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ulp", N)
    }
}
