//! Relations, projections and the combinators joining them
//!
//! - [`bind_back`]: fix the right operand of a [`Relation`]
//! - [`compose`]: feed a [`Projection`] into another projection or predicate
//! - [`all_of`]: conjunction of a tuple of predicates

use std::borrow::Cow;

use super::Predicate;
use crate::constant::Constant;

/// A binary relation between two values of the same type.
pub trait Relation<T: ?Sized> {
    /// Check if the relation holds for `lhs` and `rhs`, in that order.
    fn holds(&self, lhs: &T, rhs: &T) -> bool;

    /// Name used in predicate descriptions
    fn name(&self) -> &'static str;
}

macro_rules! relations {
    ($($(#[$doc:meta])* $rel:ident: $bound:ident, $name:literal, |$l:ident, $r:ident| $body:expr;)+) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $rel;

            impl<T: $bound + ?Sized> Relation<T> for $rel {
                #[inline]
                fn holds(&self, $l: &T, $r: &T) -> bool {
                    $body
                }

                fn name(&self) -> &'static str {
                    $name
                }
            }
        )+
    };
}

relations! {
    /// `lhs < rhs`
    Lt: PartialOrd, "less", |l, r| l < r;
    /// `lhs <= rhs`
    Le: PartialOrd, "less_equal", |l, r| l <= r;
    /// `lhs > rhs`
    Gt: PartialOrd, "greater", |l, r| l > r;
    /// `lhs >= rhs`
    Ge: PartialOrd, "greater_equal", |l, r| l >= r;
    /// `lhs == rhs`
    Eq: PartialEq, "equal_to", |l, r| l == r;
    /// `lhs != rhs`
    Ne: PartialEq, "not_equal_to", |l, r| l != r;
}

/// A relation with its right operand bound to a constant.
///
/// `BindBack<R, K>` tests `R(value, k)`. With a zero-sized constant such as
/// [`Zero`](crate::constant::Zero) or [`Int<N>`](crate::constant::Int) the
/// whole predicate is zero-sized and `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BindBack<R, K> {
    relation: R,
    bound: K,
}

impl<R, K> BindBack<R, K> {
    /// Bind `bound` as the right operand of `relation`.
    pub const fn new(relation: R, bound: K) -> Self {
        Self { relation, bound }
    }

    /// The relation
    pub fn relation(&self) -> &R {
        &self.relation
    }

    /// The bound right operand
    pub fn bound(&self) -> &K {
        &self.bound
    }
}

impl<T, R, K> Predicate<T> for BindBack<R, K>
where
    R: Relation<T>,
    K: Constant<T>,
{
    #[inline]
    fn test(&self, value: &T) -> bool {
        self.relation.holds(value, &self.bound.value())
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{}({:?})", self.relation.name(), self.bound))
    }
}

/// Bind the right operand of `relation`.
///
/// # Example
///
/// ```rust
/// use constrained_value::predicate::{bind_back, Ge, Predicate};
///
/// let at_least_ten = bind_back(Ge, 10);
/// assert!(at_least_ten.test(&10));
/// assert!(!at_least_ten.test(&9));
/// assert_eq!(Predicate::<i32>::description(&at_least_ten), "greater_equal(10)");
/// ```
pub const fn bind_back<R, K>(relation: R, bound: K) -> BindBack<R, K> {
    BindBack::new(relation, bound)
}

/// A pure mapping from `&T` to another value, e.g. a magnitude.
pub trait Projection<T: ?Sized> {
    /// Result of the projection
    type Output;

    /// Project `value`.
    fn apply(&self, value: &T) -> Self::Output;

    /// Name used in predicate descriptions
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Magnitude projection.
///
/// Signed integers and floats map to their absolute value (`-0.0` to
/// `+0.0`, NaN unchanged); unsigned integers map to themselves; complex
/// numbers map to their norm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Abs;

macro_rules! impl_abs_projection {
    ($($ty:ty),+) => {
        $(
            impl Projection<$ty> for Abs {
                type Output = $ty;

                #[inline]
                fn apply(&self, value: &$ty) -> $ty {
                    crate::math::abs(*value)
                }

                fn name(&self) -> Cow<'static, str> {
                    Cow::Borrowed("abs")
                }
            }
        )+
    };
}

impl_abs_projection!(i8, i16, i32, i64, i128, isize, f32, f64);

macro_rules! impl_unsigned_abs_projection {
    ($($ty:ty),+) => {
        $(
            impl Projection<$ty> for Abs {
                type Output = $ty;

                #[inline]
                fn apply(&self, value: &$ty) -> $ty {
                    *value
                }

                fn name(&self) -> Cow<'static, str> {
                    Cow::Borrowed("abs")
                }
            }
        )+
    };
}

impl_unsigned_abs_projection!(u8, u16, u32, u64, u128, usize);

#[cfg(feature = "complex")]
impl<F: num_traits::Float> Projection<num_complex::Complex<F>> for Abs {
    type Output = F;

    #[inline]
    fn apply(&self, value: &num_complex::Complex<F>) -> F {
        value.norm()
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("abs")
    }
}

/// `then` applied to the output of `first`.
///
/// A projection when `then` is a projection, a predicate when `then` is a
/// predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Compose<F, G> {
    first: F,
    then: G,
}

impl<F, G> Compose<F, G> {
    /// Compose `first` followed by `then`.
    pub const fn new(first: F, then: G) -> Self {
        Self { first, then }
    }
}

impl<T, F, G> Projection<T> for Compose<F, G>
where
    T: ?Sized,
    F: Projection<T>,
    G: Projection<F::Output>,
{
    type Output = G::Output;

    #[inline]
    fn apply(&self, value: &T) -> G::Output {
        self.then.apply(&self.first.apply(value))
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Owned(format!("compose({}, {})", self.first.name(), self.then.name()))
    }
}

impl<T, F, G> Predicate<T> for Compose<F, G>
where
    T: ?Sized,
    F: Projection<T>,
    G: Predicate<F::Output>,
{
    #[inline]
    fn test(&self, value: &T) -> bool {
        self.then.test(&self.first.apply(value))
    }

    fn description(&self) -> Cow<'static, str> {
        Cow::Owned(format!(
            "compose({}, {})",
            self.first.name(),
            self.then.description()
        ))
    }
}

/// Compose a projection with a projection or predicate.
///
/// # Example
///
/// ```rust
/// use constrained_value::predicate::{bind_back, compose, Abs, Lt, Predicate};
///
/// let within_five = compose(Abs, bind_back(Lt, 5));
/// assert!(within_five.test(&-4_i32));
/// assert!(!within_five.test(&-5_i32));
/// ```
pub const fn compose<F, G>(first: F, then: G) -> Compose<F, G> {
    Compose::new(first, then)
}

/// Conjunction of a tuple of predicates.
///
/// Evaluates left to right and stops at the first failure, which is the
/// component reported by [`Predicate::rejection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AllOf<Ps>(pub Ps);

impl<T: ?Sized, Ps: Predicate<T>> Predicate<T> for AllOf<Ps> {
    #[inline]
    fn test(&self, value: &T) -> bool {
        self.0.test(value)
    }

    fn description(&self) -> Cow<'static, str> {
        self.0.description()
    }

    fn rejection(&self, value: &T) -> Option<Cow<'static, str>> {
        self.0.rejection(value)
    }
}

/// Combine a tuple of predicates into their conjunction.
///
/// # Example
///
/// ```rust
/// use constrained_value::predicate::{all_of, bind_back, Gt, Lt, Ne, Predicate};
///
/// let p = all_of((bind_back(Gt, 0), bind_back(Lt, 100), bind_back(Ne, 50)));
/// assert!(p.test(&25));
/// assert!(!p.test(&50));
/// assert!(!p.test(&100));
/// ```
pub const fn all_of<Ps>(predicates: Ps) -> AllOf<Ps> {
    AllOf(predicates)
}
