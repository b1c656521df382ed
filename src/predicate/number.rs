//! Numeric predicates
//!
//! - sign: [`Negative`], [`NonNegative`], [`Positive`], [`NonPositive`]
//! - comparison with a bound: [`EqualTo`], [`NotEqualTo`], [`Less`],
//!   [`LessEqual`], [`Greater`], [`GreaterEqual`]
//! - intervals: [`Bounded`] (inclusive), [`StrictlyBounded`] (exclusive)
//! - closeness: [`Near`], with an [`Absolute`] or ULP [`Tolerance`]
//! - magnitude: [`Unit`]
//!
//! Zero is `T::default()`. Comparisons use the type's own `PartialOrd`, so
//! NaN fails every ordering predicate and `-0.0` equals `0.0`.
//!
//! # Example
//!
//! ```rust
//! use constrained_value::constant::{Int, Zero};
//! use constrained_value::predicate::*;
//! use constrained_value::ulp::{UlpOffset, Ulps};
//!
//! assert!(Positive::default().test(&0.5_f64));
//! assert!(!Positive::default().test(&-0.0_f64));
//! assert!(EqualTo::<Zero>::default().test(&-0.0_f64));
//!
//! let percent = Bounded::<Int<0>, Int<100>>::default();
//! assert!(percent.test(&100_i32));
//! assert!(!percent.test(&101_i32));
//!
//! let close_to_one = near(1.0_f64, UlpOffset::new(2));
//! assert!(close_to_one.test(&(1.0_f64 + UlpOffset::new(2))));
//! assert!(!close_to_one.test(&(1.0_f64 + UlpOffset::new(3))));
//!
//! let also_close = Near::<Int<1>, Ulps<2>>::default();
//! assert!(also_close.test(&(1.0_f32 - UlpOffset::new(2))));
//! ```

use std::borrow::Cow;
use std::fmt;

use super::combinators::{bind_back, Abs, BindBack, Compose, Eq, Ge, Gt, Le, Lt, Ne};
use super::Predicate;
use crate::constant::{Constant, One, Zero};
use crate::math::{Ieee754, SaturatingOffset};
use crate::ulp::{step_by_ulps, UlpOffset, Ulps};

/// `x < 0`
pub type Negative = BindBack<Lt, Zero>;
/// `x >= 0`
pub type NonNegative = BindBack<Ge, Zero>;
/// `x > 0`
pub type Positive = BindBack<Gt, Zero>;
/// `x <= 0`
pub type NonPositive = BindBack<Le, Zero>;

/// `x == k`
pub type EqualTo<K> = BindBack<Eq, K>;
/// `x != k`
pub type NotEqualTo<K> = BindBack<Ne, K>;
/// `x < k`
pub type Less<K> = BindBack<Lt, K>;
/// `x <= k`
pub type LessEqual<K> = BindBack<Le, K>;
/// `x > k`
pub type Greater<K> = BindBack<Gt, K>;
/// `x >= k`
pub type GreaterEqual<K> = BindBack<Ge, K>;

/// Create an [`EqualTo`] predicate.
pub const fn equal_to<K>(bound: K) -> EqualTo<K> {
    bind_back(Eq, bound)
}

/// Create a [`NotEqualTo`] predicate.
pub const fn not_equal_to<K>(bound: K) -> NotEqualTo<K> {
    bind_back(Ne, bound)
}

/// Create a [`Less`] predicate.
pub const fn less<K>(bound: K) -> Less<K> {
    bind_back(Lt, bound)
}

/// Create a [`LessEqual`] predicate.
pub const fn less_equal<K>(bound: K) -> LessEqual<K> {
    bind_back(Le, bound)
}

/// Create a [`Greater`] predicate.
pub const fn greater<K>(bound: K) -> Greater<K> {
    bind_back(Gt, bound)
}

/// Create a [`GreaterEqual`] predicate.
pub const fn greater_equal<K>(bound: K) -> GreaterEqual<K> {
    bind_back(Ge, bound)
}

fn assert_ordered_bounds<T: PartialOrd>(lower: &T, upper: &T, predicate: &str) {
    assert!(
        lower <= upper,
        "{}: lower bound must not exceed upper bound",
        predicate
    );
}

/// `lo <= x <= hi`
///
/// # Panics
///
/// Testing a value panics if the bounds are not ordered (`lo > hi`, or
/// either bound is NaN).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounded<Lo, Hi> {
    bounds: (GreaterEqual<Lo>, LessEqual<Hi>),
}

impl<Lo, Hi> Bounded<Lo, Hi> {
    /// Create an inclusive interval predicate.
    pub const fn new(lower: Lo, upper: Hi) -> Self {
        Self {
            bounds: (greater_equal(lower), less_equal(upper)),
        }
    }

    /// Lower bound
    pub fn lower(&self) -> &Lo {
        self.bounds.0.bound()
    }

    /// Upper bound
    pub fn upper(&self) -> &Hi {
        self.bounds.1.bound()
    }
}

impl<T, Lo, Hi> Predicate<T> for Bounded<Lo, Hi>
where
    T: PartialOrd,
    Lo: Constant<T>,
    Hi: Constant<T>,
{
    fn test(&self, value: &T) -> bool {
        assert_ordered_bounds(&self.lower().value(), &self.upper().value(), "bounded");
        self.bounds.test(value)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Owned(format!("bounded({:?}, {:?})", self.lower(), self.upper()))
    }

    fn rejection(&self, value: &T) -> Option<Cow<'static, str>> {
        assert_ordered_bounds(&self.lower().value(), &self.upper().value(), "bounded");
        self.bounds.rejection(value)
    }
}

/// Create a [`Bounded`] predicate.
pub const fn bounded<Lo, Hi>(lower: Lo, upper: Hi) -> Bounded<Lo, Hi> {
    Bounded::new(lower, upper)
}

/// `lo < x < hi`
///
/// # Panics
///
/// Testing a value panics if the bounds are not ordered (`lo > hi`, or
/// either bound is NaN).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StrictlyBounded<Lo, Hi> {
    bounds: (Greater<Lo>, Less<Hi>),
}

impl<Lo, Hi> StrictlyBounded<Lo, Hi> {
    /// Create an exclusive interval predicate.
    pub const fn new(lower: Lo, upper: Hi) -> Self {
        Self {
            bounds: (greater(lower), less(upper)),
        }
    }

    /// Lower bound
    pub fn lower(&self) -> &Lo {
        self.bounds.0.bound()
    }

    /// Upper bound
    pub fn upper(&self) -> &Hi {
        self.bounds.1.bound()
    }
}

impl<T, Lo, Hi> Predicate<T> for StrictlyBounded<Lo, Hi>
where
    T: PartialOrd,
    Lo: Constant<T>,
    Hi: Constant<T>,
{
    fn test(&self, value: &T) -> bool {
        assert_ordered_bounds(&self.lower().value(), &self.upper().value(), "strictly_bounded");
        self.bounds.test(value)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Owned(format!(
            "strictly_bounded({:?}, {:?})",
            self.lower(),
            self.upper()
        ))
    }

    fn rejection(&self, value: &T) -> Option<Cow<'static, str>> {
        assert_ordered_bounds(&self.lower().value(), &self.upper().value(), "strictly_bounded");
        self.bounds.rejection(value)
    }
}

/// Create a [`StrictlyBounded`] predicate.
pub const fn strictly_bounded<Lo, Hi>(lower: Lo, upper: Hi) -> StrictlyBounded<Lo, Hi> {
    StrictlyBounded::new(lower, upper)
}

/// Half-width of the interval accepted by [`Near`].
pub trait Tolerance<T>: fmt::Debug {
    /// The inclusive interval `(lower, upper)` around `reference`.
    fn interval(&self, reference: T) -> (T, T);
}

/// Absolute tolerance: `[reference - k, reference + k]`.
///
/// Integer bounds saturate at the ends of the type's range, so the
/// representable part of the interval is accepted.
///
/// # Panics
///
/// Computing the interval panics if `k` is negative or NaN.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Absolute<K>(pub K);

impl<T, K> Tolerance<T> for Absolute<K>
where
    T: PartialOrd + Default + Copy + SaturatingOffset,
    K: Constant<T>,
{
    fn interval(&self, reference: T) -> (T, T) {
        let tolerance = self.0.value();
        assert!(
            tolerance >= T::default(),
            "near: tolerance must be non-negative"
        );
        (
            reference.offset_down(tolerance),
            reference.offset_up(tolerance),
        )
    }
}

impl<K: fmt::Debug> fmt::Debug for Absolute<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Negative offsets describe an empty interval.
impl<F: Ieee754> Tolerance<F> for UlpOffset {
    fn interval(&self, reference: F) -> (F, F) {
        let steps = self.steps();
        assert!(steps >= 0, "near: ulp tolerance must be non-negative");
        (step_by_ulps(reference, -steps), step_by_ulps(reference, steps))
    }
}

impl<F: Ieee754, const N: i64> Tolerance<F> for Ulps<N> {
    fn interval(&self, reference: F) -> (F, F) {
        Self::OFFSET.interval(reference)
    }
}

/// `reference - tolerance <= x <= reference + tolerance`
///
/// With a ULP tolerance the interval is measured in representable values, so
/// its width scales with the magnitude of `reference`.
///
/// # Panics
///
/// Testing a value panics if the tolerance is negative, or if a ULP interval
/// would leave the finite range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Near<R, Tol> {
    reference: R,
    tolerance: Tol,
}

impl<R, Tol> Near<R, Tol> {
    /// Create a closeness predicate.
    pub const fn new(reference: R, tolerance: Tol) -> Self {
        Self {
            reference,
            tolerance,
        }
    }

    /// The reference value
    pub fn reference(&self) -> &R {
        &self.reference
    }

    /// The tolerance
    pub fn tolerance(&self) -> &Tol {
        &self.tolerance
    }

    /// The accepted interval, bounds included.
    pub fn interval<T>(&self) -> (T, T)
    where
        R: Constant<T>,
        Tol: Tolerance<T>,
    {
        self.tolerance.interval(self.reference.value())
    }
}

impl<T, R, Tol> Predicate<T> for Near<R, Tol>
where
    T: PartialOrd,
    R: Constant<T>,
    Tol: Tolerance<T>,
{
    fn test(&self, value: &T) -> bool {
        let (lower, upper) = self.interval::<T>();
        &lower <= value && value <= &upper
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Owned(format!("near({:?}, {:?})", self.reference, self.tolerance))
    }
}

/// Create a [`Near`] predicate.
pub const fn near<R, Tol>(reference: R, tolerance: Tol) -> Near<R, Tol> {
    Near::new(reference, tolerance)
}

/// `|x| == 1`, for real and complex values.
pub type Unit = Compose<Abs, EqualTo<One>>;

/// Alias of [`Unit`]
pub type Unity = Unit;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{ConstF64, Int};

    #[test]
    fn test_sign_predicates_on_integers() {
        assert!(Negative::default().test(&-1_i32));
        assert!(!Negative::default().test(&0_i32));
        assert!(NonNegative::default().test(&0_u8));
        assert!(Positive::default().test(&1_i64));
        assert!(!Positive::default().test(&0_i64));
        assert!(NonPositive::default().test(&0_i16));
        assert!(!NonPositive::default().test(&1_i16));
    }

    #[test]
    fn test_sign_predicates_on_signed_zero() {
        assert!(!Negative::default().test(&-0.0_f64));
        assert!(NonNegative::default().test(&-0.0_f64));
        assert!(NonPositive::default().test(&0.0_f64));
        assert!(!Positive::default().test(&0.0_f64));
    }

    #[test]
    fn test_nan_fails_ordering_predicates() {
        assert!(!Positive::default().test(&f64::NAN));
        assert!(!NonNegative::default().test(&f64::NAN));
        assert!(!Negative::default().test(&f64::NAN));
        assert!(!NonPositive::default().test(&f64::NAN));
        assert!(!bounded(0.0_f64, 1.0).test(&f64::NAN));
        assert!(not_equal_to(0.0_f64).test(&f64::NAN));
    }

    #[test]
    fn test_equal_to_uses_ieee_equality() {
        assert!(EqualTo::<Zero>::default().test(&-0.0_f64));
        assert!(equal_to(-0.0_f32).test(&0.0));
        assert!(!EqualTo::<Zero>::default().test(&f64::MIN_POSITIVE));
    }

    #[test]
    fn test_comparison_constructors() {
        assert!(less(3_i32).test(&2));
        assert!(!less(3_i32).test(&3));
        assert!(less_equal(3_i32).test(&3));
        assert!(greater(3_u64).test(&4));
        assert!(!greater(3_u64).test(&3));
        assert!(greater_equal(3_u64).test(&3));
    }

    #[test]
    fn test_bounded_is_inclusive() {
        let p = Bounded::<Int<0>, Int<1>>::default();
        assert!(p.test(&0.0_f64));
        assert!(p.test(&1.0_f64));
        assert!(p.test(&-0.0_f64));
        assert!(!p.test(&1.0_f64.next_up()));
        assert!(!p.test(&(-f64::from_bits(1))));
    }

    #[test]
    fn test_strictly_bounded_is_exclusive() {
        let p = StrictlyBounded::<Int<0>, Int<1>>::default();
        assert!(p.test(&0.5_f64));
        assert!(!p.test(&0.0_f64));
        assert!(!p.test(&1.0_f64));
        assert!(p.test(&1.0_f64.next_down()));
        assert!(p.test(&f64::from_bits(1)));
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(bounded(2_i32, 2).test(&2));
        assert!(!strictly_bounded(2_i32, 2).test(&2));
    }

    #[test]
    #[should_panic(expected = "bounded: lower bound must not exceed upper bound")]
    fn test_bounded_rejects_inverted_bounds() {
        bounded(1.0_f64, 0.0).test(&0.5);
    }

    #[test]
    #[should_panic(expected = "strictly_bounded: lower bound must not exceed upper bound")]
    fn test_strictly_bounded_rejects_nan_bound() {
        strictly_bounded(f64::NAN, 1.0).test(&0.5_f64);
    }

    #[test]
    fn test_bounded_reports_violated_side() {
        let p = bounded(0_i32, 10);
        assert_eq!(p.rejection(&-1).as_deref(), Some("greater_equal(0)"));
        assert_eq!(p.rejection(&11).as_deref(), Some("less_equal(10)"));
        assert_eq!(Predicate::<i32>::description(&p), "bounded(0, 10)");
    }

    #[test]
    fn test_near_absolute() {
        let p = Near::<Zero, Absolute<One>>::default();
        assert!(p.test(&1.0_f64));
        assert!(p.test(&-1.0_f64));
        assert!(p.test(&0.0_f64));
        assert!(!p.test(&1.0_f64.next_up()));
        assert!(!p.test(&(-1.0_f64).next_down()));
        assert_eq!(Predicate::<f64>::description(&p), "near(0, 1)");
    }

    #[test]
    fn test_near_with_runtime_reference() {
        let p = near(10_i32, Absolute(2_i32));
        assert!(p.test(&8));
        assert!(p.test(&12));
        assert!(!p.test(&13));
        assert_eq!(p.interval::<i32>(), (8, 12));
    }

    #[test]
    fn test_near_ulps() {
        type Half = ConstF64<{ 0.5_f64.to_bits() }>;
        let p = Near::<Half, Ulps<1>>::default();

        assert!(p.test(&0.5));
        assert!(p.test(&0.5_f64.next_up()));
        assert!(p.test(&0.5_f64.next_down()));
        assert!(!p.test(&0.5_f64.next_up().next_up()));
        assert_eq!(Predicate::<f64>::description(&p), "near(0.5, 1 ulp)");
    }

    #[test]
    fn test_near_ulps_across_zero() {
        let p = near(0.0_f64, UlpOffset::new(2));
        let (lower, upper) = p.interval::<f64>();

        assert_eq!(lower, -f64::from_bits(2));
        assert_eq!(upper, f64::from_bits(2));
        assert!(p.test(&-0.0));
        assert!(!p.test(&f64::from_bits(3)));
    }

    #[test]
    #[should_panic(expected = "near: tolerance must be non-negative")]
    fn test_near_rejects_negative_tolerance() {
        near(0.0_f64, Absolute(-1.0_f64)).test(&0.0);
    }

    #[test]
    #[should_panic(expected = "near: ulp tolerance must be non-negative")]
    fn test_near_rejects_negative_ulps() {
        near(0.0_f64, UlpOffset::new(-1)).test(&0.0_f64);
    }

    #[test]
    fn test_unit_on_reals() {
        let unit = Unit::default();
        assert!(unit.test(&1.0_f64));
        assert!(unit.test(&-1.0_f64));
        assert!(unit.test(&-1_i32));
        assert!(!unit.test(&0.0_f64));
        assert!(!unit.test(&1.0_f64.next_up()));
        assert!(!unit.test(&f64::NAN));
        assert_eq!(Predicate::<f64>::description(&unit), "compose(abs, equal_to(1))");
    }

    #[cfg(feature = "complex")]
    #[test]
    fn test_unit_on_complex() {
        use num_complex::Complex;

        let unit = Unity::default();
        assert!(unit.test(&Complex::new(1.0_f64, 0.0)));
        assert!(unit.test(&Complex::new(0.0_f64, 1.0)));
        assert!(unit.test(&Complex::new(0.0_f64, -1.0)));
        assert!(unit.test(&Complex::new(-1.0_f32, 0.0)));
        assert!(!unit.test(&Complex::new(0.0_f64, 0.0)));
        assert!(!unit.test(&Complex::new(1.0_f64, 1.0)));
    }

    #[test]
    fn test_near_absolute_saturates_at_integer_bounds() {
        let top = near(i32::MAX, Absolute(1_i32));
        assert!(top.test(&i32::MAX));
        assert!(top.test(&(i32::MAX - 1)));
        assert!(!top.test(&(i32::MAX - 2)));
        assert_eq!(top.interval::<i32>(), (i32::MAX - 1, i32::MAX));

        let bottom = near(i32::MIN, Absolute(1_i32));
        assert!(bottom.test(&i32::MIN));
        assert!(bottom.test(&(i32::MIN + 1)));
        assert!(!bottom.test(&(i32::MIN + 2)));
    }

    #[test]
    fn test_near_absolute_unsigned_reference_near_zero() {
        let small = near(0_u8, Absolute(2_u8));
        assert!(small.test(&0));
        assert!(small.test(&1));
        assert!(small.test(&2));
        assert!(!small.test(&3));

        let type_level = Near::<Int<1>, Absolute<Int<5>>>::default();
        assert_eq!(type_level.interval::<u32>(), (0, 6));
        assert!(type_level.test(&0_u32));
        assert!(!type_level.test(&7_u32));
    }

    #[test]
    fn test_unit_on_unsigned() {
        let unit = Unit::default();
        assert!(unit.test(&1_u32));
        assert!(!unit.test(&0_u32));
        assert!(!unit.test(&2_u8));
        assert!(unit.test(&1_usize));
    }
}
