//! Numeric primitives
//!
//! Pure functions over numeric value types that stay correct at the bit level
//! for floating-point edge cases:
//!
//! - [`abs`]: magnitude, mapping `-0.0` to `+0.0` and passing NaN through
//! - [`is_nan`], [`is_infinite`], [`is_finite`]: special value tests
//! - [`signbit`]: sign bit test, the only way to tell `+0.0` from `-0.0`
//! - [`signum`]: three-way comparison as a signed integer
//! - [`SaturatingOffset`]: `x ± d` clamped to the representable range
//!
//! [`NumericLimits`] describes the range and special values of a type, and
//! [`verify_limits`] checks that a description is complete and consistent.
//!
//! # Example
//!
//! ```rust
//! use constrained_value::math::{abs, is_finite, signbit, signum};
//!
//! assert_eq!(abs(-0.0_f64).to_bits(), 0.0_f64.to_bits());
//! assert!(signbit(-0.0_f64));
//! assert!(!is_finite(f64::NAN));
//! assert_eq!(signum::<i8, _>(2.0, 1.0), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use num_traits::{PrimInt, SaturatingAdd, SaturatingSub, Signed, Zero};

use crate::bits::BitReinterpret;

/// Rounding behavior of a numeric type's arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundStyle {
    /// Rounding style cannot be determined
    Indeterminate,
    /// Rounding toward zero (integer division)
    TowardZero,
    /// Rounding to the nearest representable value
    ToNearest,
    /// Rounding toward positive infinity
    TowardInfinity,
    /// Rounding toward negative infinity
    TowardNegInfinity,
}

/// Full description of a numeric type's representable range and special values.
///
/// Special values a type does not have are reported as `None`, and the
/// matching `HAS_*` flag must be `false`. [`verify_limits`] checks this and
/// the ordering relations between the reported values.
pub trait NumericLimits: Copy + PartialOrd + Default {
    /// Type represents negative values
    const IS_SIGNED: bool;
    /// Type represents only integers
    const IS_INTEGER: bool;
    /// Arithmetic on the type is exact
    const IS_EXACT: bool;
    /// Type follows IEC 559 (IEEE 754)
    const IS_IEC559: bool;
    /// Type represents a finite set of values
    const IS_BOUNDED: bool;
    /// Arithmetic wraps on overflow
    const IS_MODULO: bool;
    /// Type has a positive infinity
    const HAS_INFINITY: bool;
    /// Type has a quiet NaN
    const HAS_QUIET_NAN: bool;
    /// Type has a signaling NaN
    const HAS_SIGNALING_NAN: bool;
    /// Type has subnormal values
    const HAS_DENORM: bool;
    /// Radix of the representation
    const RADIX: u32;
    /// Number of radix digits represented without change
    const DIGITS: u32;
    /// Rounding style of arithmetic
    const ROUND_STYLE: RoundStyle;

    /// Most negative value for integers, smallest positive normal value for
    /// floating-point types.
    fn smallest() -> Self;
    /// Lowest finite value
    fn lowest() -> Self;
    /// Largest finite value
    fn max() -> Self;
    /// Difference between one and the next representable value
    fn epsilon() -> Self;
    /// Maximum rounding error
    fn round_error() -> Self;
    /// Positive infinity
    fn infinity() -> Option<Self>;
    /// A quiet NaN
    fn quiet_nan() -> Option<Self>;
    /// A signaling NaN
    fn signaling_nan() -> Option<Self>;
    /// Smallest positive subnormal value
    fn denorm_min() -> Option<Self>;
}

/// A type admitted into the numeric primitives.
///
/// Fully described by [`NumericLimits`], default-initializable to zero and an
/// additive group: `T::zero()` is the additive identity and `-x` the inverse.
pub trait Numeric: NumericLimits + Zero + Neg<Output = Self> {}

impl<T> Numeric for T where T: NumericLimits + Zero + Neg<Output = T> {}

/// A numeric type following IEC 559 whose bits can be reinterpreted.
///
/// This is the domain of [`ulp_distance`](crate::ulp::ulp_distance) and ULP
/// stepping.
pub trait Ieee754: Numeric + BitReinterpret {}

impl Ieee754 for f32 {}
impl Ieee754 for f64 {}

macro_rules! impl_integer_limits {
    ($($ty:ty => $signed:expr),+ $(,)?) => {
        $(
            impl NumericLimits for $ty {
                const IS_SIGNED: bool = $signed;
                const IS_INTEGER: bool = true;
                const IS_EXACT: bool = true;
                const IS_IEC559: bool = false;
                const IS_BOUNDED: bool = true;
                const IS_MODULO: bool = !$signed;
                const HAS_INFINITY: bool = false;
                const HAS_QUIET_NAN: bool = false;
                const HAS_SIGNALING_NAN: bool = false;
                const HAS_DENORM: bool = false;
                const RADIX: u32 = 2;
                const DIGITS: u32 = <$ty>::BITS - ($signed as u32);
                const ROUND_STYLE: RoundStyle = RoundStyle::TowardZero;

                fn smallest() -> Self { <$ty>::MIN }
                fn lowest() -> Self { <$ty>::MIN }
                fn max() -> Self { <$ty>::MAX }
                fn epsilon() -> Self { 0 }
                fn round_error() -> Self { 0 }
                fn infinity() -> Option<Self> { None }
                fn quiet_nan() -> Option<Self> { None }
                fn signaling_nan() -> Option<Self> { None }
                fn denorm_min() -> Option<Self> { None }
            }
        )+
    };
}

impl_integer_limits!(
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    i128 => true,
    isize => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
    u128 => false,
    usize => false,
);

macro_rules! impl_float_limits {
    ($($ty:ident => $signaling:expr),+ $(,)?) => {
        $(
            impl NumericLimits for $ty {
                const IS_SIGNED: bool = true;
                const IS_INTEGER: bool = false;
                const IS_EXACT: bool = false;
                const IS_IEC559: bool = true;
                const IS_BOUNDED: bool = true;
                const IS_MODULO: bool = false;
                const HAS_INFINITY: bool = true;
                const HAS_QUIET_NAN: bool = true;
                const HAS_SIGNALING_NAN: bool = true;
                const HAS_DENORM: bool = true;
                const RADIX: u32 = $ty::RADIX;
                const DIGITS: u32 = $ty::MANTISSA_DIGITS;
                const ROUND_STYLE: RoundStyle = RoundStyle::ToNearest;

                fn smallest() -> Self { $ty::MIN_POSITIVE }
                fn lowest() -> Self { $ty::MIN }
                fn max() -> Self { $ty::MAX }
                fn epsilon() -> Self { $ty::EPSILON }
                fn round_error() -> Self { 0.5 }
                fn infinity() -> Option<Self> { Some($ty::INFINITY) }
                fn quiet_nan() -> Option<Self> { Some($ty::NAN) }
                fn signaling_nan() -> Option<Self> { Some($ty::from_bits($signaling)) }
                fn denorm_min() -> Option<Self> { Some($ty::from_bits(1)) }
            }
        )+
    };
}

impl_float_limits!(
    f32 => 0x7FA0_0000,
    f64 => 0x7FF4_0000_0000_0000,
);

/// An inconsistency found by [`verify_limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitsError {
    /// Zero lies outside `[lowest, max]`
    ZeroOutOfRange,
    /// `smallest` is on the wrong side of zero for the kind of type
    SmallestMisplaced,
    /// `max` is not below infinity
    InfinityNotAboveMax,
    /// A NaN compares equal to itself
    NanEqualsItself,
    /// `denorm_min` is outside `[0, smallest]`
    DenormOutOfRange,
    /// A `HAS_*` flag disagrees with the reported special value
    FlagMismatch(&'static str),
    /// An IEC 559 type lacks a required property
    NotIec559(&'static str),
}

impl fmt::Display for LimitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitsError::ZeroOutOfRange => write!(f, "zero is outside [lowest, max]"),
            LimitsError::SmallestMisplaced => {
                write!(f, "smallest value is on the wrong side of zero")
            }
            LimitsError::InfinityNotAboveMax => write!(f, "max is not below infinity"),
            LimitsError::NanEqualsItself => write!(f, "NaN compares equal to itself"),
            LimitsError::DenormOutOfRange => write!(f, "denorm_min is outside [0, smallest]"),
            LimitsError::FlagMismatch(flag) => {
                write!(f, "{} disagrees with the reported special value", flag)
            }
            LimitsError::NotIec559(what) => write!(f, "IEC 559 type {}", what),
        }
    }
}

impl std::error::Error for LimitsError {}

fn flag_agrees<T>(flag: bool, value: &Option<T>, name: &'static str) -> Result<(), LimitsError> {
    if flag == value.is_some() {
        Ok(())
    } else {
        Err(LimitsError::FlagMismatch(name))
    }
}

/// Check that `T` fully and consistently implements [`NumericLimits`].
///
/// # Example
///
/// ```rust
/// use constrained_value::math::verify_limits;
///
/// assert!(verify_limits::<f64>().is_ok());
/// assert!(verify_limits::<u8>().is_ok());
/// ```
pub fn verify_limits<T: NumericLimits>() -> Result<(), LimitsError> {
    let zero = T::default();

    flag_agrees(T::HAS_INFINITY, &T::infinity(), "HAS_INFINITY")?;
    flag_agrees(T::HAS_QUIET_NAN, &T::quiet_nan(), "HAS_QUIET_NAN")?;
    flag_agrees(T::HAS_SIGNALING_NAN, &T::signaling_nan(), "HAS_SIGNALING_NAN")?;
    flag_agrees(T::HAS_DENORM, &T::denorm_min(), "HAS_DENORM")?;

    if T::IS_BOUNDED {
        if !(T::lowest() <= zero && zero <= T::max()) {
            return Err(LimitsError::ZeroOutOfRange);
        }

        let placed = if T::IS_INTEGER {
            T::smallest() <= zero
        } else {
            zero <= T::smallest()
        };
        if !placed {
            return Err(LimitsError::SmallestMisplaced);
        }
    }

    if let Some(infinity) = T::infinity() {
        if !(T::max() < infinity) {
            return Err(LimitsError::InfinityNotAboveMax);
        }
    }

    for nan in [T::quiet_nan(), T::signaling_nan()].into_iter().flatten() {
        if !is_nan(&nan) {
            return Err(LimitsError::NanEqualsItself);
        }
    }

    if let Some(denorm_min) = T::denorm_min() {
        if !(zero <= denorm_min && denorm_min <= T::smallest()) {
            return Err(LimitsError::DenormOutOfRange);
        }
    }

    if T::IS_IEC559 {
        if T::RADIX != 2 {
            return Err(LimitsError::NotIec559("must have radix 2"));
        }
        if !(T::HAS_INFINITY && T::HAS_QUIET_NAN && T::HAS_SIGNALING_NAN) {
            return Err(LimitsError::NotIec559("must have infinity and both NaNs"));
        }
    }

    Ok(())
}

/// Magnitude of a value.
///
/// Returns the zero value (never `-0.0`) when `value == 0`, returns `value`
/// unchanged when it is NaN, and otherwise whichever of `value` and `-value`
/// is non-negative.
///
/// # Panics
///
/// Negating the most negative value of a two's complement integer overflows.
///
/// # Example
///
/// ```rust
/// use constrained_value::math::abs;
///
/// assert_eq!(abs(-3), 3);
/// assert_eq!(abs(-2.5), 2.5);
/// assert!(abs(-0.0_f64).is_sign_positive());
/// assert!(abs(f64::NAN).is_nan());
/// ```
#[inline]
pub fn abs<T>(value: T) -> T
where
    T: Copy + PartialOrd + Zero + Neg<Output = T>,
{
    let zero = T::zero();
    if value == zero {
        return zero;
    }
    if is_nan(&value) {
        return value;
    }
    if zero < value {
        value
    } else {
        -value
    }
}

/// Check if a value is NaN, i.e. does not equal itself.
///
/// ```rust
/// use constrained_value::math::is_nan;
///
/// assert!(is_nan(&f32::NAN));
/// assert!(!is_nan(&f32::NAN.to_bits()));
/// ```
#[inline]
#[allow(clippy::eq_op)]
pub fn is_nan<T: PartialEq + ?Sized>(value: &T) -> bool {
    value != value
}

/// Check if a value equals positive or negative infinity.
///
/// Always `false` for types without an infinity.
#[inline]
pub fn is_infinite<T: Numeric>(value: T) -> bool {
    match T::infinity() {
        Some(infinity) => value == infinity || value == -infinity,
        None => false,
    }
}

/// Check if a value is neither NaN nor infinite.
#[inline]
pub fn is_finite<T: Numeric>(value: T) -> bool {
    !(is_nan(&value) || is_infinite(value))
}

/// Check if the sign bit of a value's representation is set.
///
/// This is a bit-level test, independent of comparison:
///
/// ```rust
/// use constrained_value::math::signbit;
///
/// assert!(signbit(-0.0_f64));
/// assert!(!signbit(0.0_f64));
/// assert!(signbit(0x80_u8));
/// ```
#[inline]
pub fn signbit<T: BitReinterpret>(value: T) -> bool {
    value.to_signed_bits() < T::Bits::zero()
}

/// Three-way comparison of `x` and `y` as a signed integer of width `I`.
///
/// Returns `-1` if `x < y`, `0` if `x == y` and `1` if `x > y`.
///
/// # Panics
///
/// Panics if `x` and `y` are not comparable, e.g. when either is NaN.
///
/// ```rust
/// use constrained_value::math::signum;
///
/// assert_eq!(signum::<i32, _>(-1.0, 0.0), -1);
/// assert_eq!(signum::<i64, _>(-0.0, 0.0), 0);
/// ```
#[inline]
pub fn signum<I, T>(x: T, y: T) -> I
where
    I: PrimInt + Signed,
    T: PartialOrd,
{
    match x.partial_cmp(&y) {
        Some(Ordering::Less) => -I::one(),
        Some(Ordering::Equal) => I::zero(),
        Some(Ordering::Greater) => I::one(),
        None => panic!("signum: arguments are not comparable"),
    }
}

/// `x + d` and `x - d` clamped to the representable range.
///
/// Integers saturate at their bounds. Floating-point values use ordinary
/// arithmetic, which already rounds to the infinities on overflow.
///
/// ```rust
/// use constrained_value::math::SaturatingOffset;
///
/// assert_eq!(i32::MAX.offset_up(1), i32::MAX);
/// assert_eq!(0_u8.offset_down(2), 0);
/// assert_eq!(1.5_f64.offset_down(0.5), 1.0);
/// ```
pub trait SaturatingOffset: Sized {
    /// `self + delta`, clamped
    fn offset_up(self, delta: Self) -> Self;

    /// `self - delta`, clamped
    fn offset_down(self, delta: Self) -> Self;
}

macro_rules! impl_saturating_offset_int {
    ($($ty:ty),+) => {
        $(
            impl SaturatingOffset for $ty {
                #[inline]
                fn offset_up(self, delta: Self) -> Self {
                    SaturatingAdd::saturating_add(&self, &delta)
                }

                #[inline]
                fn offset_down(self, delta: Self) -> Self {
                    SaturatingSub::saturating_sub(&self, &delta)
                }
            }
        )+
    };
}

impl_saturating_offset_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_saturating_offset_float {
    ($($ty:ty),+) => {
        $(
            impl SaturatingOffset for $ty {
                #[inline]
                fn offset_up(self, delta: Self) -> Self {
                    self + delta
                }

                #[inline]
                fn offset_down(self, delta: Self) -> Self {
                    self - delta
                }
            }
        )+
    };
}

impl_saturating_offset_float!(f32, f64);
