//! Constrained values
//!
//! [`ConstrainedValue<T, P, V>`] holds a `T` that always satisfies the
//! predicate `P`. Every way in (construction, default construction,
//! assignment) runs the predicate first; on failure the violation policy `V`
//! decides what happens, and the stored value is never touched.
//!
//! # Quick Start
//!
//! ```rust
//! use constrained_value::constant::Int;
//! use constrained_value::policy::Reject;
//! use constrained_value::predicate;
//! use constrained_value::ConstrainedValue;
//!
//! type Percent = ConstrainedValue<u8, predicate::Bounded<Int<0>, Int<100>>, Reject>;
//!
//! let mut p = Percent::try_new(40).unwrap();
//! assert_eq!(*p, 40);
//!
//! assert!(p.try_set(140).is_err());
//! assert_eq!(*p, 40);
//!
//! assert!(Percent::is_valid(&100));
//! assert!(!Percent::is_valid(&101));
//! ```
//!
//! # Policies
//!
//! With the default [`PrintAndAbort`] policy, or [`Panic`](crate::policy::Panic),
//! a violation never returns, so construction and assignment are infallible:
//!
//! ```rust
//! use constrained_value::Positive;
//!
//! type Rate = Positive<f64>;
//!
//! let mut rate = Rate::new(0.25);
//! rate.set(0.5);
//! assert_eq!(rate.into_inner(), 0.5);
//! ```
//!
//! Policies with an error type use the `try_` operations instead.
//!
//! # Run-time predicates
//!
//! Predicates that are not `Default` (configured bounds, closures) are
//! passed in at construction and kept with the value:
//!
//! ```rust
//! use constrained_value::policy::Reject;
//! use constrained_value::predicate::{bounded, Bounded};
//! use constrained_value::ConstrainedValue;
//!
//! type Gain = ConstrainedValue<f32, Bounded<f32, f32>, Reject>;
//!
//! let mut gain = Gain::try_with_predicate(bounded(-6.0, 6.0), 1.5).unwrap();
//! assert!(gain.try_set(-6.0).is_ok());
//! assert!(gain.try_set(9.0).is_err());
//! assert!(gain.admits(&3.0));
//! ```

mod aliases;
#[cfg(feature = "serde")]
mod serde_impl;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub use aliases::*;

use crate::policy::{Ignore, PrintAndAbort, SourceLocation, Violation, ViolationPolicy};
use crate::predicate::Predicate;

const NEW: &str = "ConstrainedValue::new";
const DEFAULT: &str = "ConstrainedValue::default";
const SET: &str = "ConstrainedValue::set";
const MAP: &str = "ConstrainedValue::try_map";
const IS_VALID: &str = "ConstrainedValue::is_valid";

/// Run `predicate` on `value` and hand any failure to the policy `V`.
fn enforce<T, P, V>(
    predicate: &P,
    value: &T,
    caller: &'static str,
    location: SourceLocation,
) -> Result<(), V::Error>
where
    P: Predicate<T>,
    V: ViolationPolicy<T>,
{
    match predicate.rejection(value) {
        None => Ok(()),
        Some(description) => Err(V::default().on_violation(Violation::new(
            value,
            description,
            caller,
            location,
        ))),
    }
}

fn unreachable_violation<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// A value of type `T` that is guaranteed to satisfy predicate `P`.
///
/// Violations are handled by the policy `V`, [`PrintAndAbort`] unless
/// specified. The predicate is stored with the value; type-level predicates
/// are zero-sized, so `ConstrainedValue<T, P, V>` is then the size of `T`.
///
/// Access is read-only (`get`, `Deref`, `AsRef`, `Borrow`); the only way to
/// change the value is a validating [`set`](Self::set) /
/// [`try_set`](Self::try_set).
pub struct ConstrainedValue<T, P, V = PrintAndAbort> {
    value: T,
    predicate: P,
    _policy: PhantomData<fn() -> V>,
}

impl<T, P, V> ConstrainedValue<T, P, V> {
    /// Get a reference to the inner value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consume the constrained value, returning the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The predicate guarding the value.
    #[inline]
    pub fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<T, P: Predicate<T>, V> ConstrainedValue<T, P, V> {
    /// Check `value` against the type-level predicate without constructing
    /// anything. No policy fires.
    ///
    /// # Example
    ///
    /// ```rust
    /// use constrained_value::StrictlyBounded;
    /// use constrained_value::constant::Int;
    ///
    /// type Open = StrictlyBounded<f64, Int<0>, Int<1>>;
    ///
    /// assert!(Open::is_valid(&0.5));
    /// assert!(!Open::is_valid(&1.0));
    /// ```
    pub fn is_valid(value: &T) -> bool
    where
        P: Default,
    {
        Self::is_valid_for(&P::default(), value)
    }

    /// Check `value` against a given predicate instance. No policy fires.
    pub fn is_valid_for(predicate: &P, value: &T) -> bool {
        enforce::<T, P, Ignore>(predicate, value, IS_VALID, SourceLocation::caller()).is_ok()
    }

    /// Check `value` against this instance's predicate. No policy fires.
    pub fn admits(&self, value: &T) -> bool {
        Self::is_valid_for(&self.predicate, value)
    }
}

impl<T, P, V> ConstrainedValue<T, P, V>
where
    P: Predicate<T>,
    V: ViolationPolicy<T>,
{
    /// Construct from `value`, validating it with the type-level predicate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use constrained_value::policy::Reject;
    /// use constrained_value::predicate::Positive;
    /// use constrained_value::ConstrainedValue;
    ///
    /// type Count = ConstrainedValue<i32, Positive, Reject>;
    ///
    /// assert!(Count::try_new(3).is_ok());
    /// assert!(Count::try_new(0).is_err());
    /// ```
    #[track_caller]
    pub fn try_new(value: T) -> Result<Self, V::Error>
    where
        P: Default,
    {
        Self::try_with_predicate_at(P::default(), value, SourceLocation::caller())
    }

    /// [`try_new`](Self::try_new) with an explicit location.
    pub fn try_new_at(value: T, location: SourceLocation) -> Result<Self, V::Error>
    where
        P: Default,
    {
        Self::try_with_predicate_at(P::default(), value, location)
    }

    /// Construct from `value`, validating it with `predicate`.
    #[track_caller]
    pub fn try_with_predicate(predicate: P, value: T) -> Result<Self, V::Error> {
        Self::try_with_predicate_at(predicate, value, SourceLocation::caller())
    }

    /// [`try_with_predicate`](Self::try_with_predicate) with an explicit
    /// location.
    pub fn try_with_predicate_at(
        predicate: P,
        value: T,
        location: SourceLocation,
    ) -> Result<Self, V::Error> {
        enforce::<T, P, V>(&predicate, &value, NEW, location)?;
        Ok(Self {
            value,
            predicate,
            _policy: PhantomData,
        })
    }

    /// Construct from `T::default()`, validating it.
    #[track_caller]
    pub fn try_default() -> Result<Self, V::Error>
    where
        T: Default,
        P: Default,
    {
        let predicate = P::default();
        let value = T::default();
        enforce::<T, P, V>(&predicate, &value, DEFAULT, SourceLocation::caller())?;
        Ok(Self {
            value,
            predicate,
            _policy: PhantomData,
        })
    }

    /// Replace the value if `value` satisfies the predicate.
    ///
    /// On failure the stored value is unchanged.
    #[track_caller]
    pub fn try_set(&mut self, value: T) -> Result<(), V::Error> {
        self.try_set_at(value, SourceLocation::caller())
    }

    /// [`try_set`](Self::try_set) with an explicit location.
    pub fn try_set_at(&mut self, value: T, location: SourceLocation) -> Result<(), V::Error> {
        enforce::<T, P, V>(&self.predicate, &value, SET, location)?;
        self.value = value;
        Ok(())
    }

    /// Map the inner value, re-checking the predicate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use constrained_value::policy::Reject;
    /// use constrained_value::predicate::Positive;
    /// use constrained_value::ConstrainedValue;
    ///
    /// type Count = ConstrainedValue<i32, Positive, Reject>;
    ///
    /// let n = Count::try_new(42).unwrap();
    /// assert_eq!(*n.try_map(|x| x * 2).unwrap(), 84);
    ///
    /// let n = Count::try_new(5).unwrap();
    /// assert!(n.try_map(|x| -x).is_err());
    /// ```
    #[track_caller]
    pub fn try_map<F>(self, f: F) -> Result<Self, V::Error>
    where
        F: FnOnce(T) -> T,
    {
        let value = f(self.value);
        enforce::<T, P, V>(&self.predicate, &value, MAP, SourceLocation::caller())?;
        Ok(Self {
            value,
            predicate: self.predicate,
            _policy: PhantomData,
        })
    }
}

impl<T, P, V> ConstrainedValue<T, P, V>
where
    P: Predicate<T>,
    V: ViolationPolicy<T, Error = Infallible>,
{
    /// Construct from `value`, validating it with the type-level predicate.
    ///
    /// The policy never returns, so neither does an invalid construction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use constrained_value::constant::Int;
    /// use constrained_value::Bounded;
    ///
    /// type Octet = Bounded<i32, Int<0>, Int<255>>;
    ///
    /// let octet = Octet::new(192);
    /// assert_eq!(*octet, 192);
    /// ```
    #[track_caller]
    pub fn new(value: T) -> Self
    where
        P: Default,
    {
        unreachable_violation(Self::try_new_at(value, SourceLocation::caller()))
    }

    /// [`new`](Self::new) with an explicit location.
    pub fn new_at(value: T, location: SourceLocation) -> Self
    where
        P: Default,
    {
        unreachable_violation(Self::try_new_at(value, location))
    }

    /// Construct from `value`, validating it with `predicate`.
    #[track_caller]
    pub fn with_predicate(predicate: P, value: T) -> Self {
        unreachable_violation(Self::try_with_predicate_at(
            predicate,
            value,
            SourceLocation::caller(),
        ))
    }

    /// [`with_predicate`](Self::with_predicate) with an explicit location.
    pub fn with_predicate_at(predicate: P, value: T, location: SourceLocation) -> Self {
        unreachable_violation(Self::try_with_predicate_at(predicate, value, location))
    }

    /// Replace the value, validating it first.
    #[track_caller]
    pub fn set(&mut self, value: T) {
        unreachable_violation(self.try_set_at(value, SourceLocation::caller()))
    }

    /// [`set`](Self::set) with an explicit location.
    pub fn set_at(&mut self, value: T, location: SourceLocation) {
        unreachable_violation(self.try_set_at(value, location))
    }
}

impl<T, P, V> Default for ConstrainedValue<T, P, V>
where
    T: Default,
    P: Predicate<T> + Default,
    V: ViolationPolicy<T, Error = Infallible>,
{
    #[track_caller]
    fn default() -> Self {
        unreachable_violation(Self::try_default())
    }
}

impl<T: fmt::Debug, P: Predicate<T>, V> fmt::Debug for ConstrainedValue<T, P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedValue")
            .field("value", &self.value)
            .field("predicate", &self.predicate.description())
            .finish()
    }
}

impl<T: Clone, P: Clone, V> Clone for ConstrainedValue<T, P, V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            predicate: self.predicate.clone(),
            _policy: PhantomData,
        }
    }
}

impl<T: Copy, P: Copy, V> Copy for ConstrainedValue<T, P, V> {}

impl<T: PartialEq, P, V> PartialEq for ConstrainedValue<T, P, V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq, P, V> Eq for ConstrainedValue<T, P, V> {}

impl<T: PartialOrd, P, V> PartialOrd for ConstrainedValue<T, P, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord, P, V> Ord for ConstrainedValue<T, P, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash, P, V> Hash for ConstrainedValue<T, P, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T, P, V> AsRef<T> for ConstrainedValue<T, P, V> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T, P, V> Borrow<T> for ConstrainedValue<T, P, V> {
    fn borrow(&self) -> &T {
        &self.value
    }
}

impl<T, P, V> std::ops::Deref for ConstrainedValue<T, P, V> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display, P, V> fmt::Display for ConstrainedValue<T, P, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
