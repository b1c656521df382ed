//! Bit reinterpretation of values as same-width signed integers
//!
//! [`BitReinterpret`] views the raw storage of a value as the signed integer
//! with the same width. This is a reinterpretation of the bit pattern, never
//! a numeric conversion: `-0.0_f64` maps to `i64::MIN`, not to `0`.
//!
//! The mapping is total and lossless, which makes it the basis for
//! ordering-independent bit inspection ([`signbit`](crate::math::signbit))
//! and for ULP arithmetic ([`ulp_distance`](crate::ulp::ulp_distance)).
//!
//! # Example
//!
//! ```rust
//! use constrained_value::bits::BitReinterpret;
//!
//! assert_eq!((-0.0_f64).to_signed_bits(), i64::MIN);
//! assert_eq!(0.0_f64.to_signed_bits(), 0);
//! assert_eq!(u8::MAX.to_signed_bits(), -1_i8);
//!
//! let one = 1.0_f32.to_signed_bits();
//! assert_eq!(f32::from_signed_bits(one), 1.0);
//! ```

use std::fmt;
use std::hash::Hash;

use num_traits::{CheckedAdd, CheckedNeg, NumCast, PrimInt, Signed};

/// A value whose bit pattern can be viewed as a same-width signed integer.
///
/// Only types with a width of 8, 16, 32 or 64 bits implement this trait;
/// anything else is rejected at compile time.
pub trait BitReinterpret: Copy {
    /// Signed integer with the same width as `Self`
    type Bits: PrimInt
        + Signed
        + NumCast
        + CheckedAdd
        + CheckedNeg
        + Hash
        + fmt::Debug
        + fmt::Display;

    /// Reinterpret the bit pattern of `self` as [`Self::Bits`].
    fn to_signed_bits(self) -> Self::Bits;

    /// Reinterpret a bit pattern produced by [`to_signed_bits`](Self::to_signed_bits).
    fn from_signed_bits(bits: Self::Bits) -> Self;
}

/// Reinterpret the bit pattern of `value` as a same-width signed integer.
///
/// # Example
///
/// ```rust
/// use constrained_value::bits::reinterpret;
///
/// assert_eq!(reinterpret(1.0_f64), 0x3FF0_0000_0000_0000);
/// ```
#[inline]
pub fn reinterpret<T: BitReinterpret>(value: T) -> T::Bits {
    value.to_signed_bits()
}

macro_rules! impl_float_bits {
    ($($float:ty => $bits:ty, $unsigned:ty);+ $(;)?) => {
        $(
            const _: () = assert!(std::mem::size_of::<$float>() == std::mem::size_of::<$bits>());

            impl BitReinterpret for $float {
                type Bits = $bits;

                #[inline]
                fn to_signed_bits(self) -> $bits {
                    self.to_bits() as $bits
                }

                #[inline]
                fn from_signed_bits(bits: $bits) -> Self {
                    <$float>::from_bits(bits as $unsigned)
                }
            }
        )+
    };
}

impl_float_bits!(
    f32 => i32, u32;
    f64 => i64, u64;
);

// Same-width `as` casts between integers keep the bit pattern.
macro_rules! impl_integer_bits {
    ($($int:ty => $bits:ty),+ $(,)?) => {
        $(
            const _: () = assert!(std::mem::size_of::<$int>() == std::mem::size_of::<$bits>());

            impl BitReinterpret for $int {
                type Bits = $bits;

                #[inline]
                fn to_signed_bits(self) -> $bits {
                    self as $bits
                }

                #[inline]
                fn from_signed_bits(bits: $bits) -> Self {
                    bits as $int
                }
            }
        )+
    };
}

impl_integer_bits!(
    i8 => i8,
    u8 => i8,
    i16 => i16,
    u16 => i16,
    i32 => i32,
    u32 => i32,
    i64 => i64,
    u64 => i64,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_reinterpretation_is_not_conversion() {
        assert_eq!(1.0_f64.to_signed_bits(), 0x3FF0_0000_0000_0000);
        assert_eq!(1.0_f32.to_signed_bits(), 0x3F80_0000);
        assert_ne!(2.5_f64.to_signed_bits(), 2);
    }

    #[test]
    fn test_signed_zero_bits() {
        assert_eq!(0.0_f64.to_signed_bits(), 0);
        assert_eq!((-0.0_f64).to_signed_bits(), i64::MIN);
        assert_eq!(0.0_f32.to_signed_bits(), 0);
        assert_eq!((-0.0_f32).to_signed_bits(), i32::MIN);
    }

    #[test]
    fn test_unsigned_high_bit_is_negative() {
        assert_eq!(0xFF_u8.to_signed_bits(), -1);
        assert_eq!(0x80_u8.to_signed_bits(), i8::MIN);
        assert_eq!(0x7F_u8.to_signed_bits(), 0x7F);
        assert_eq!(u64::MAX.to_signed_bits(), -1);
    }

    #[test]
    fn test_round_trip_preserves_bits() {
        for value in [0.0, -0.0, 1.5, -3.25, f64::MIN_POSITIVE, f64::MAX, f64::INFINITY] {
            let back = f64::from_signed_bits(value.to_signed_bits());
            assert_eq!(back.to_bits(), value.to_bits());
        }

        let nan = f32::NAN;
        assert_eq!(f32::from_signed_bits(nan.to_signed_bits()).to_bits(), nan.to_bits());

        assert_eq!(u16::from_signed_bits(u16::MAX.to_signed_bits()), u16::MAX);
        assert_eq!(i32::from_signed_bits(i32::MIN.to_signed_bits()), i32::MIN);
    }

    #[test]
    fn test_reinterpret_function() {
        assert_eq!(reinterpret(-1_i16), -1_i16);
        assert_eq!(reinterpret(f64::from_bits(1)), 1_i64);
    }
}
