//! Type aliases for common constrained values
//!
//! Each alias fixes the predicate of a [`ConstrainedValue`] and leaves the
//! value type, bounds and policy open. The policy defaults to
//! [`PrintAndAbort`].
//!
//! # Example
//!
//! ```rust
//! use constrained_value::constant::{ConstF64, Int};
//! use constrained_value::ulp::Ulps;
//! use constrained_value::{Bounded, Near, NonNegative, Unit};
//!
//! type Balance = NonNegative<i64>;
//! type Probability = Bounded<f64, Int<0>, Int<1>>;
//! type AboutHalf = Near<f64, ConstF64<{ 0.5_f64.to_bits() }>, Ulps<4>>;
//! type Direction = Unit<f64>;
//!
//! let balance = Balance::new(1000);
//! let p = Probability::new(0.25);
//! let half = AboutHalf::new(0.5);
//! let sign = Direction::new(-1.0);
//!
//! assert_eq!(*balance + 1, 1001);
//! assert!(*p < *half);
//! assert!(!Direction::is_valid(&0.0));
//! assert_eq!(*sign, -1.0);
//! ```

use super::ConstrainedValue;
use crate::policy::PrintAndAbort;
use crate::predicate;

/// `x < 0`
pub type Negative<T, V = PrintAndAbort> = ConstrainedValue<T, predicate::Negative, V>;

/// `x >= 0`
pub type NonNegative<T, V = PrintAndAbort> = ConstrainedValue<T, predicate::NonNegative, V>;

/// `x > 0`
pub type Positive<T, V = PrintAndAbort> = ConstrainedValue<T, predicate::Positive, V>;

/// `x <= 0`
pub type NonPositive<T, V = PrintAndAbort> = ConstrainedValue<T, predicate::NonPositive, V>;

/// `x == k`
pub type EqualTo<T, K, V = PrintAndAbort> = ConstrainedValue<T, predicate::EqualTo<K>, V>;

/// `x != k`
pub type NotEqualTo<T, K, V = PrintAndAbort> = ConstrainedValue<T, predicate::NotEqualTo<K>, V>;

/// `x < k`
pub type Less<T, K, V = PrintAndAbort> = ConstrainedValue<T, predicate::Less<K>, V>;

/// `x <= k`
pub type LessEqual<T, K, V = PrintAndAbort> = ConstrainedValue<T, predicate::LessEqual<K>, V>;

/// `x > k`
pub type Greater<T, K, V = PrintAndAbort> = ConstrainedValue<T, predicate::Greater<K>, V>;

/// `x >= k`
pub type GreaterEqual<T, K, V = PrintAndAbort> =
    ConstrainedValue<T, predicate::GreaterEqual<K>, V>;

/// `lo <= x <= hi`
pub type Bounded<T, Lo, Hi, V = PrintAndAbort> =
    ConstrainedValue<T, predicate::Bounded<Lo, Hi>, V>;

/// `lo < x < hi`
pub type StrictlyBounded<T, Lo, Hi, V = PrintAndAbort> =
    ConstrainedValue<T, predicate::StrictlyBounded<Lo, Hi>, V>;

/// `x` within `tol` of `r`, absolute or in ULPs
pub type Near<T, R, Tol, V = PrintAndAbort> = ConstrainedValue<T, predicate::Near<R, Tol>, V>;

/// `|x| == 1`
pub type Unit<T, V = PrintAndAbort> = ConstrainedValue<T, predicate::Unit, V>;

/// Alias of [`Unit`]
pub type Unity<T, V = PrintAndAbort> = Unit<T, V>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{ConstF64, Int, One, Zero};
    use crate::policy::Reject;
    use crate::predicate::Absolute;

    type NegativeF32 = Negative<f32, Reject>;
    type NonPositiveI8 = NonPositive<i8, Reject>;
    type AnswerI32 = EqualTo<i32, Int<42>, Reject>;
    type NotZeroF64 = NotEqualTo<f64, Zero, Reject>;
    type BelowTenU16 = Less<u16, Int<10>, Reject>;
    type AtMostTenU16 = LessEqual<u16, Int<10>, Reject>;
    type AboveOneF64 = Greater<f64, One, Reject>;
    type AtLeastOneF64 = GreaterEqual<f64, One, Reject>;
    type NearZeroF64 = Near<f64, Zero, Absolute<ConstF64<{ 0.5_f64.to_bits() }>>, Reject>;
    type UnityF64 = Unity<f64, Reject>;

    #[test]
    fn test_sign_aliases() {
        assert!(NegativeF32::try_new(-0.5).is_ok());
        assert!(NegativeF32::try_new(-0.0).is_err());
        assert!(NonPositiveI8::try_new(0).is_ok());
        assert!(NonPositiveI8::try_new(1).is_err());
    }

    #[test]
    fn test_comparison_aliases() {
        assert!(AnswerI32::try_new(42).is_ok());
        assert!(AnswerI32::try_new(41).is_err());
        assert!(NotZeroF64::try_new(-0.0).is_err());
        assert!(BelowTenU16::try_new(10).is_err());
        assert!(AtMostTenU16::try_new(10).is_ok());
        assert!(AboveOneF64::try_new(1.0).is_err());
        assert!(AtLeastOneF64::try_new(1.0).is_ok());
    }

    #[test]
    fn test_near_alias() {
        assert!(NearZeroF64::try_new(0.5).is_ok());
        assert!(NearZeroF64::try_new(-0.5).is_ok());
        assert!(NearZeroF64::try_new(0.5_f64.next_up()).is_err());
    }

    #[test]
    fn test_unity_alias() {
        assert!(UnityF64::try_new(-1.0).is_ok());
        assert!(UnityF64::try_new(0.5).is_err());
    }
}
