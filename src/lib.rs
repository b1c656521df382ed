//! # constrained-value
//!
//! Wrapper types whose values can never violate a stated invariant.
//!
//! A [`ConstrainedValue<T, P, V>`] holds a `T` that satisfies the predicate
//! `P` at every observable instant: construction, default construction and
//! assignment all validate first, and a failure is handed to the violation
//! policy `V` instead of being stored.
//!
//! The numeric side makes tolerance-style invariants exact for
//! floating-point values: signed zeros, NaN and infinity exclusion, and
//! distances measured in ULPs (representable steps) rather than absolute
//! differences.
//!
//! ## Quick Example
//!
//! ```rust
//! use constrained_value::constant::{Int, Zero};
//! use constrained_value::policy::Reject;
//! use constrained_value::predicate;
//! use constrained_value::ulp::Ulps;
//! use constrained_value::ConstrainedValue;
//!
//! // Within 2 representable steps of zero
//! type Tiny = ConstrainedValue<f64, predicate::Near<Zero, Ulps<2>>, Reject>;
//!
//! assert!(Tiny::try_new(-0.0).is_ok());
//! assert!(Tiny::try_new(f64::from_bits(2)).is_ok());
//! assert!(Tiny::try_new(f64::from_bits(3)).is_err());
//!
//! // Inclusive bounds, default policy aborts on violation
//! type Percent = constrained_value::Bounded<u8, Int<0>, Int<100>>;
//! let mut p = Percent::new(40);
//! p.set(100);
//! assert_eq!(*p, 100);
//! ```
//!
//! ## Modules
//!
//! - [`math`]: numeric limits and bit-exact `abs`, `signbit`, `signum`, ...
//! - [`bits`]: bit reinterpretation as same-width signed integers
//! - [`ulp`]: ULP distance and ULP stepping
//! - [`constant`]: bounds usable at run time or in the type
//! - [`predicate`]: predicates and their combinators
//! - [`policy`]: what happens when a predicate fails
//! - [`testing`]: assertion macros and property-test strategies

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bits;
pub mod constant;
mod constrained;
pub mod math;
pub mod policy;
pub mod predicate;
pub mod testing;
pub mod ulp;

pub use constrained::*;
pub use policy::{ContractViolation, ViolationPolicy};
pub use predicate::Predicate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::constant::{Bitwise, ConstF32, ConstF64, Constant, Int, One, Zero};
    pub use crate::policy::{
        ContractViolation, Ignore, Panic, PrintAndAbort, Reject, SourceLocation, ViolationPolicy,
    };
    pub use crate::predicate::{all_of, bind_back, compose, from_fn, Predicate};
    pub use crate::ulp::{ulp_distance, UlpOffset, Ulps};
    pub use crate::ConstrainedValue;
}
