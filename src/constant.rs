//! Constants bindable to predicates
//!
//! Predicates such as [`Greater`](crate::predicate::Greater) or
//! [`Near`](crate::predicate::Near) compare against a bound. The bound is any
//! [`Constant<T>`]: either an ordinary value held at run time, or a
//! zero-sized type that produces its value on demand, which lets the whole
//! predicate live in the type of a constrained value.
//!
//! Const generics only carry integers, so floating-point bounds at the type
//! level go through their bit patterns ([`ConstF64`], [`ConstF32`]).
//!
//! # Example
//!
//! ```rust
//! use constrained_value::constant::{Constant, ConstF64, Int, One, Zero};
//!
//! assert_eq!(Constant::<f64>::value(&Zero), 0.0);
//! assert_eq!(Constant::<i32>::value(&One), 1);
//! assert_eq!(Constant::<f32>::value(&Int::<-3>), -3.0);
//!
//! type Half = ConstF64<{ 0.5_f64.to_bits() }>;
//! assert_eq!(Half::VALUE, 0.5);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::bits::BitReinterpret;

/// A value of type `T` usable as a predicate bound.
///
/// The `Debug` output of a constant is used in predicate descriptions.
pub trait Constant<T>: fmt::Debug {
    /// Produce the value
    fn value(&self) -> T;
}

/// The additive identity, `T::default()`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Zero;

impl<T: Default> Constant<T> for Zero {
    #[inline]
    fn value(&self) -> T {
        T::default()
    }
}

impl fmt::Debug for Zero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0")
    }
}

/// The multiplicative identity.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct One;

impl<T: num_traits::One> Constant<T> for One {
    #[inline]
    fn value(&self) -> T {
        T::one()
    }
}

impl fmt::Debug for One {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("1")
    }
}

/// Type-level integer `N`, convertible to any primitive numeric type.
///
/// # Panics
///
/// Producing the value panics when `N` is not exactly representable in the
/// target type, e.g. `Int<-1>` as `u8` or `Int<{ (1 << 53) + 1 }>` as `f64`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Int<const N: i64>;

impl<const N: i64> fmt::Debug for Int<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", N)
    }
}

macro_rules! impl_int_constant_narrowing {
    ($($int:ty),+) => {
        $(
            impl<const N: i64> Constant<$int> for Int<N> {
                #[inline]
                fn value(&self) -> $int {
                    match <$int>::try_from(N) {
                        Ok(value) => value,
                        Err(_) => panic!(
                            "Int<{}>: not representable as {}",
                            N,
                            stringify!($int)
                        ),
                    }
                }
            }
        )+
    };
}

impl_int_constant_narrowing!(i8, i16, i32, isize, u8, u16, u32, u64, u128, usize);

impl<const N: i64> Constant<i64> for Int<N> {
    #[inline]
    fn value(&self) -> i64 {
        N
    }
}

impl<const N: i64> Constant<i128> for Int<N> {
    #[inline]
    fn value(&self) -> i128 {
        i128::from(N)
    }
}

// Inexact conversions panic instead of rounding the bound.
macro_rules! impl_int_constant_float {
    ($($float:ty),+) => {
        $(
            impl<const N: i64> Constant<$float> for Int<N> {
                #[inline]
                fn value(&self) -> $float {
                    let value = N as $float;
                    if value as i128 != i128::from(N) {
                        panic!(
                            "Int<{}>: not representable as {}",
                            N,
                            stringify!($float)
                        );
                    }
                    value
                }
            }
        )+
    };
}

impl_int_constant_float!(f32, f64);

#[cfg(feature = "complex")]
impl<const N: i64, F> Constant<num_complex::Complex<F>> for Int<N>
where
    Int<N>: Constant<F>,
    F: num_traits::Zero,
{
    #[inline]
    fn value(&self) -> num_complex::Complex<F> {
        num_complex::Complex::new(Constant::<F>::value(self), F::zero())
    }
}

// Plain values are their own constant.
macro_rules! impl_value_constant {
    ($($ty:ty),+) => {
        $(
            impl Constant<$ty> for $ty {
                #[inline]
                fn value(&self) -> $ty {
                    *self
                }
            }
        )+
    };
}

impl_value_constant!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

#[cfg(feature = "complex")]
impl<F: Clone + fmt::Debug> Constant<num_complex::Complex<F>> for num_complex::Complex<F> {
    #[inline]
    fn value(&self) -> num_complex::Complex<F> {
        self.clone()
    }
}

/// An immutable bit snapshot of a value.
///
/// Stores the bit pattern of a `T` as its same-width signed integer, so any
/// [`BitReinterpret`] value (floating-point included) can be held wherever
/// only integers fit. Comparison and arithmetic reinterpret back to `T`,
/// operate, and reinterpret forward: a `Bitwise<f64>` compares and adds like
/// an `f64`, including `-0.0 == 0.0` and NaN being unordered.
///
/// # Example
///
/// ```rust
/// use constrained_value::constant::Bitwise;
///
/// let a = Bitwise::new(0.25_f64);
/// let b = Bitwise::from(0.5_f64);
///
/// assert!(a < b);
/// assert_eq!((a + b).value(), 0.75);
/// assert_eq!(Bitwise::new(-0.0_f64), Bitwise::new(0.0));
/// assert_ne!(Bitwise::new(-0.0_f64).bits(), Bitwise::new(0.0).bits());
/// ```
pub struct Bitwise<T: BitReinterpret> {
    bits: T::Bits,
}

impl<T: BitReinterpret> Bitwise<T> {
    /// Snapshot the bits of `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            bits: value.to_signed_bits(),
        }
    }

    /// Wrap a bit pattern previously produced by [`bits`](Self::bits).
    #[inline]
    pub fn from_bits(bits: T::Bits) -> Self {
        Self { bits }
    }

    /// The value the bits represent.
    #[inline]
    pub fn value(self) -> T {
        T::from_signed_bits(self.bits)
    }

    /// The stored bit pattern.
    #[inline]
    pub fn bits(self) -> T::Bits {
        self.bits
    }
}

impl<T: BitReinterpret> Clone for Bitwise<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: BitReinterpret> Copy for Bitwise<T> {}

impl<T: BitReinterpret> From<T> for Bitwise<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: BitReinterpret + PartialEq> PartialEq for Bitwise<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<T: BitReinterpret + PartialOrd> PartialOrd for Bitwise<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value().partial_cmp(&other.value())
    }
}

impl<T: BitReinterpret + fmt::Debug> fmt::Debug for Bitwise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Bitwise").field(&self.value()).finish()
    }
}

impl<T: BitReinterpret + fmt::Display> fmt::Display for Bitwise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value().fmt(f)
    }
}

impl<T: BitReinterpret + fmt::Debug> Constant<T> for Bitwise<T> {
    #[inline]
    fn value(&self) -> T {
        Bitwise::value(*self)
    }
}

impl<T: BitReinterpret + Neg<Output = T>> Neg for Bitwise<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value())
    }
}

macro_rules! impl_bitwise_binary_op {
    ($($trait:ident :: $method:ident),+) => {
        $(
            impl<T: BitReinterpret + $trait<Output = T>> $trait for Bitwise<T> {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self {
                    Self::new($trait::$method(self.value(), rhs.value()))
                }
            }
        )+
    };
}

impl_bitwise_binary_op!(Add::add, Sub::sub, Mul::mul, Div::div);

/// Type-level `f64` given by its bit pattern.
///
/// ```rust
/// use constrained_value::constant::{Constant, ConstF64};
///
/// type Tenth = ConstF64<{ 0.1_f64.to_bits() }>;
/// assert_eq!(Tenth::default().value(), 0.1);
/// assert_eq!(format!("{:?}", Tenth::default()), "0.1");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConstF64<const BITS: u64>;

impl<const BITS: u64> ConstF64<BITS> {
    /// The value
    pub const VALUE: f64 = f64::from_bits(BITS);

    /// The value as a [`Bitwise`] snapshot
    pub fn bitwise() -> Bitwise<f64> {
        Bitwise::new(Self::VALUE)
    }
}

impl<const BITS: u64> Constant<f64> for ConstF64<BITS> {
    #[inline]
    fn value(&self) -> f64 {
        Self::VALUE
    }
}

impl<const BITS: u64> fmt::Debug for ConstF64<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", Self::VALUE)
    }
}

/// Type-level `f32` given by its bit pattern.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConstF32<const BITS: u32>;

impl<const BITS: u32> ConstF32<BITS> {
    /// The value
    pub const VALUE: f32 = f32::from_bits(BITS);

    /// The value as a [`Bitwise`] snapshot
    pub fn bitwise() -> Bitwise<f32> {
        Bitwise::new(Self::VALUE)
    }
}

impl<const BITS: u32> Constant<f32> for ConstF32<BITS> {
    #[inline]
    fn value(&self) -> f32 {
        Self::VALUE
    }
}

impl<const BITS: u32> fmt::Debug for ConstF32<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", Self::VALUE)
    }
}
