//! Predicates and predicate combinators
//!
//! A [`Predicate<T>`] is a pure test over `&T`. Concrete predicates are built
//! from a few small pieces:
//!
//! - a binary [`Relation`] (`Lt`, `Le`, `Gt`, `Ge`, `Eq`, `Ne`) with its right
//!   operand fixed by [`bind_back`]
//! - a [`Projection`] such as [`Abs`] feeding another predicate through
//!   [`compose`]
//! - conjunction of several predicates with [`all_of`], or a plain tuple
//!
//! Bounds are [`Constant`](crate::constant::Constant)s, so the same predicate
//! type can hold its configuration at run time (`Greater<f64>`) or carry it in
//! the type (`Greater<Int<5>>`), in which case it is zero-sized and `Default`.
//!
//! # Example
//!
//! ```rust
//! use constrained_value::constant::Int;
//! use constrained_value::predicate::*;
//!
//! let small_positive = all_of((Positive::default(), Less::<Int<10>>::default()));
//! assert!(small_positive.test(&3));
//! assert!(!small_positive.test(&0));
//! assert!(!small_positive.test(&10));
//!
//! let in_unit_interval = bounded(0.0, 1.0);
//! assert!(in_unit_interval.test(&1.0));
//! assert!(!in_unit_interval.test(&1.5));
//! ```

mod combinators;
mod number;

use std::borrow::Cow;
use std::fmt;

pub use combinators::{
    all_of, bind_back, compose, Abs, AllOf, BindBack, Compose, Eq, Ge, Gt, Le, Lt, Ne, Projection,
    Relation,
};
pub use number::{
    bounded, equal_to, greater, greater_equal, less, less_equal, near, not_equal_to,
    strictly_bounded, Absolute, Bounded, EqualTo, Greater, GreaterEqual, Less, LessEqual, Near,
    Negative, NonNegative, NonPositive, NotEqualTo, Positive, StrictlyBounded, Tolerance, Unit,
    Unity,
};

/// A pure test over values of type `T`.
///
/// Implementations must give the same answer every time they are asked about
/// the same value; the validation engine relies on it.
///
/// # Example
///
/// ```rust
/// use constrained_value::predicate::Predicate;
///
/// #[derive(Default)]
/// struct Even;
///
/// impl Predicate<i32> for Even {
///     fn test(&self, value: &i32) -> bool {
///         value % 2 == 0
///     }
/// }
///
/// assert!(Even.test(&4));
/// assert_eq!(Even.rejection(&3).as_deref(), Some(std::any::type_name::<Even>()));
/// ```
pub trait Predicate<T: ?Sized> {
    /// Check if the value satisfies this predicate.
    fn test(&self, value: &T) -> bool;

    /// Human-readable identifier used in diagnostics
    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    /// Description of the failing part of this predicate, or `None` if
    /// `value` satisfies it.
    ///
    /// Conjunctions report the first failing component rather than
    /// themselves.
    fn rejection(&self, value: &T) -> Option<Cow<'static, str>> {
        if self.test(value) {
            None
        } else {
            Some(self.description())
        }
    }
}

impl<T: ?Sized, P: Predicate<T> + ?Sized> Predicate<T> for &P {
    #[inline]
    fn test(&self, value: &T) -> bool {
        (**self).test(value)
    }

    fn description(&self) -> Cow<'static, str> {
        (**self).description()
    }

    fn rejection(&self, value: &T) -> Option<Cow<'static, str>> {
        (**self).rejection(value)
    }
}

// The empty conjunction holds for every value.
impl<T: ?Sized> Predicate<T> for () {
    #[inline]
    fn test(&self, _value: &T) -> bool {
        true
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed("all_of()")
    }
}

macro_rules! impl_predicate_for_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<T: ?Sized, $($name: Predicate<T>),+> Predicate<T> for ($($name,)+) {
            #[inline]
            fn test(&self, value: &T) -> bool {
                $(self.$idx.test(value))&&+
            }

            fn description(&self) -> Cow<'static, str> {
                let parts = [$(self.$idx.description()),+];
                Cow::Owned(format!("all_of({})", parts.join(", ")))
            }

            fn rejection(&self, value: &T) -> Option<Cow<'static, str>> {
                $(
                    if let Some(failed) = self.$idx.rejection(value) {
                        return Some(failed);
                    }
                )+
                None
            }
        }
    };
}

impl_predicate_for_tuple!(A.0);
impl_predicate_for_tuple!(A.0, B.1);
impl_predicate_for_tuple!(A.0, B.1, C.2);
impl_predicate_for_tuple!(A.0, B.1, C.2, D.3);
impl_predicate_for_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_predicate_for_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_predicate_for_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_predicate_for_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

/// Predicate backed by a closure, created by [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F> {
    f: F,
    name: &'static str,
}

impl<F> FromFn<F> {
    /// Use `name` as the description in diagnostics.
    pub fn named(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Predicate<T> for FromFn<F> {
    #[inline]
    fn test(&self, value: &T) -> bool {
        (self.f)(value)
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.name)
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").field("name", &self.name).finish()
    }
}

/// Adapt a closure to [`Predicate`].
///
/// Closure predicates carry run-time state, so they are used with
/// [`ConstrainedValue::with_predicate`](crate::ConstrainedValue::with_predicate)
/// rather than as a type-level predicate.
///
/// # Example
///
/// ```rust
/// use constrained_value::predicate::{from_fn, Predicate};
///
/// let even = from_fn(|x: &u32| x % 2 == 0).named("even");
/// assert!(even.test(&10));
/// assert_eq!(even.rejection(&3).as_deref(), Some("even"));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn {
        f,
        name: "<closure>",
    }
}
