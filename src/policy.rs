//! Violation policies
//!
//! When a value fails the predicate of a
//! [`ConstrainedValue`](crate::ConstrainedValue), the engine builds a
//! [`Violation`] describing what failed and where, and hands it to the
//! [`ViolationPolicy`] bound to the type. The policy decides what happens
//! next:
//!
//! | Policy | `Error` | Behavior |
//! |--------|---------|----------|
//! | [`PrintAndAbort`] | `Infallible` | diagnostic on stderr, then `abort()` |
//! | [`Panic`] | `Infallible` | unwinds with a [`ContractViolation`] payload |
//! | [`Reject`] | [`ContractViolation`] | returned as `Err` |
//! | [`Ignore`] | `()` | nothing |
//! | `LogAndReject` | [`ContractViolation`] | `tracing` event, then `Err` (feature `tracing`) |
//!
//! Policies whose `Error` is `Infallible` never return, which is what lets
//! [`ConstrainedValue::new`](crate::ConstrainedValue::new) and
//! [`set`](crate::ConstrainedValue::set) be infallible.
//!
//! # Diagnostic format
//!
//! ```text
//! file: src/main.rs(12:5) `app::main`: contract violated in `ConstrainedValue::new`. greater(0)(-1) is false.
//! ```

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::io::Write;

/// Where a validation took place.
///
/// Captured with `#[track_caller]` by the engine, or with
/// [`source_location!`](crate::source_location) when the enclosing function
/// name is wanted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
    column: u32,
    function: Option<&'static str>,
}

impl SourceLocation {
    /// Create a location without a function name.
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self {
            file,
            line,
            column,
            function: None,
        }
    }

    /// The location of the caller of the current `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line(), location.column())
    }

    /// Attach the name of the enclosing function.
    pub const fn with_function(self, function: &'static str) -> Self {
        Self {
            function: Some(function),
            ..self
        }
    }

    /// Source file
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Line, starting at 1
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Column, starting at 1
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Enclosing function, if it was captured
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}:{}) `{}`",
            self.file,
            self.line,
            self.column,
            self.function.unwrap_or("<unknown>")
        )
    }
}

/// Capture the current [`SourceLocation`], including the enclosing function.
///
/// # Example
///
/// ```rust
/// use constrained_value::source_location;
///
/// fn here() -> constrained_value::policy::SourceLocation {
///     source_location!()
/// }
///
/// let location = here();
/// assert!(location.function().unwrap().ends_with("here"));
/// assert!(location.file().ends_with(".rs"));
/// ```
#[macro_export]
macro_rules! source_location {
    () => {{
        fn __here() {}
        let name = ::std::any::type_name_of_val(&__here);
        let name = name.strip_suffix("::__here").unwrap_or(name);
        $crate::policy::SourceLocation::new(file!(), line!(), column!()).with_function(name)
    }};
}

fn write_diagnostic(
    f: &mut fmt::Formatter<'_>,
    location: &SourceLocation,
    caller: &str,
    predicate: &str,
    value: &dyn fmt::Display,
) -> fmt::Result {
    write!(
        f,
        "file: {}: contract violated in `{}`. {}({}) is false.",
        location, caller, predicate, value
    )
}

/// A failed validation, borrowed from the engine for the duration of the
/// policy call.
#[derive(Debug)]
pub struct Violation<'a, T: ?Sized> {
    value: &'a T,
    predicate: Cow<'static, str>,
    caller: &'static str,
    location: SourceLocation,
}

impl<'a, T: ?Sized> Violation<'a, T> {
    /// Describe a failed validation.
    pub fn new(
        value: &'a T,
        predicate: impl Into<Cow<'static, str>>,
        caller: &'static str,
        location: SourceLocation,
    ) -> Self {
        Self {
            value,
            predicate: predicate.into(),
            caller,
            location,
        }
    }

    /// The rejected value
    pub fn value(&self) -> &'a T {
        self.value
    }

    /// Description of the failing predicate
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Engine operation that ran the validation, e.g. `ConstrainedValue::set`
    pub fn caller(&self) -> &'static str {
        self.caller
    }

    /// Where the validation was requested
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

impl<T: fmt::Display + ?Sized> Violation<'_, T> {
    /// Convert into an owned error, rendering the value with `Display`.
    pub fn to_contract_violation(&self) -> ContractViolation {
        ContractViolation {
            value: self.value.to_string(),
            predicate: self.predicate.clone(),
            caller: self.caller,
            location: self.location,
        }
    }
}

impl<T: fmt::Display + ?Sized> fmt::Display for Violation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_diagnostic(f, &self.location, self.caller, &self.predicate, &self.value)
    }
}

/// Owned form of a [`Violation`].
///
/// The error type of [`Reject`], the panic payload of [`Panic`], and the
/// message of serde deserialization failures.
///
/// # Example
///
/// ```rust
/// use constrained_value::policy::{Reject, SourceLocation};
/// use constrained_value::predicate::Positive;
/// use constrained_value::ConstrainedValue;
///
/// type Strict = ConstrainedValue<i32, Positive, Reject>;
///
/// let location = SourceLocation::new("src/app.rs", 3, 9);
/// let err = Strict::try_new_at(-1, location).unwrap_err();
///
/// assert_eq!(err.value(), "-1");
/// assert_eq!(
///     err.to_string(),
///     "file: src/app.rs(3:9) `<unknown>`: contract violated in `ConstrainedValue::new`. greater(0)(-1) is false."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractViolation {
    value: String,
    predicate: Cow<'static, str>,
    caller: &'static str,
    location: SourceLocation,
}

impl ContractViolation {
    /// The rejected value, rendered with `Display`
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Description of the failing predicate
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Engine operation that ran the validation
    pub fn caller(&self) -> &'static str {
        self.caller
    }

    /// Where the validation was requested
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

impl<T: fmt::Display + ?Sized> From<Violation<'_, T>> for ContractViolation {
    fn from(violation: Violation<'_, T>) -> Self {
        violation.to_contract_violation()
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_diagnostic(f, &self.location, self.caller, &self.predicate, &self.value)
    }
}

impl std::error::Error for ContractViolation {}

/// Strategy invoked when a predicate rejects a value.
///
/// Policies are stateless and built with `Default` at every violation.
///
/// # Example
///
/// ```rust
/// use constrained_value::policy::{Violation, ViolationPolicy};
/// use constrained_value::predicate::NonNegative;
/// use constrained_value::ConstrainedValue;
///
/// #[derive(Default)]
/// struct Describe;
///
/// impl<T: ?Sized> ViolationPolicy<T> for Describe {
///     type Error = String;
///
///     fn on_violation(&self, violation: Violation<'_, T>) -> String {
///         format!("{} in {}", violation.predicate(), violation.caller())
///     }
/// }
///
/// type Count = ConstrainedValue<i64, NonNegative, Describe>;
///
/// let err = Count::try_new(-3).unwrap_err();
/// assert_eq!(err, "greater_equal(0) in ConstrainedValue::new");
/// ```
pub trait ViolationPolicy<T: ?Sized>: Default {
    /// What the engine returns on violation
    type Error;

    /// Handle a violation.
    fn on_violation(&self, violation: Violation<'_, T>) -> Self::Error;
}

/// Destination of the diagnostic line written by [`PrintAndAbort`].
pub trait DiagnosticSink: Default {
    /// Write one diagnostic line.
    fn emit(&self, diagnostic: &dyn fmt::Display);
}

/// Standard error, locked for the duration of a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stderr;

impl DiagnosticSink for Stderr {
    fn emit(&self, diagnostic: &dyn fmt::Display) {
        let mut handle = std::io::stderr().lock();
        // The process is about to abort; a failed write has nowhere to go.
        let _ = writeln!(handle, "{}", diagnostic);
        let _ = handle.flush();
    }
}

/// Default policy: write the diagnostic to the sink and abort the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintAndAbort<S = Stderr> {
    sink: S,
}

impl<T, S> ViolationPolicy<T> for PrintAndAbort<S>
where
    T: fmt::Display + ?Sized,
    S: DiagnosticSink,
{
    type Error = Infallible;

    fn on_violation(&self, violation: Violation<'_, T>) -> Infallible {
        #[cfg(feature = "tracing")]
        tracing::error!(
            caller = violation.caller(),
            predicate = violation.predicate(),
            value = %violation.value(),
            "contract violated, aborting"
        );

        self.sink.emit(&violation);
        std::process::abort()
    }
}

/// Unwind with a [`ContractViolation`] payload.
///
/// The payload can be recovered with `std::panic::catch_unwind` and
/// `downcast_ref::<ContractViolation>()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Panic;

impl<T: fmt::Display + ?Sized> ViolationPolicy<T> for Panic {
    type Error = Infallible;

    fn on_violation(&self, violation: Violation<'_, T>) -> Infallible {
        std::panic::panic_any(violation.to_contract_violation())
    }
}

/// Return the [`ContractViolation`] to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reject;

impl<T: fmt::Display + ?Sized> ViolationPolicy<T> for Reject {
    type Error = ContractViolation;

    fn on_violation(&self, violation: Violation<'_, T>) -> ContractViolation {
        violation.to_contract_violation()
    }
}

/// Do nothing; the engine only reports failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl<T: ?Sized> ViolationPolicy<T> for Ignore {
    type Error = ();

    #[inline]
    fn on_violation(&self, _violation: Violation<'_, T>) {}
}

/// Emit a structured `tracing` error event, then return the
/// [`ContractViolation`].
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndReject;

#[cfg(feature = "tracing")]
impl<T: fmt::Display + ?Sized> ViolationPolicy<T> for LogAndReject {
    type Error = ContractViolation;

    fn on_violation(&self, violation: Violation<'_, T>) -> ContractViolation {
        let location = violation.location();
        tracing::error!(
            file = location.file(),
            line = location.line(),
            column = location.column(),
            function = location.function().unwrap_or("<unknown>"),
            caller = violation.caller(),
            predicate = violation.predicate(),
            value = %violation.value(),
            "contract violated"
        );
        violation.to_contract_violation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> SourceLocation {
        SourceLocation::new("src/lib.rs", 10, 5)
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(&-2.5_f64, "greater(0)", "ConstrainedValue::set", location());
        assert_eq!(
            violation.to_string(),
            "file: src/lib.rs(10:5) `<unknown>`: contract violated in `ConstrainedValue::set`. greater(0)(-2.5) is false."
        );
    }

    #[test]
    fn test_display_with_function() {
        let located = location().with_function("app::configure");
        let violation = Violation::new(&7_u8, "less(5)", "ConstrainedValue::new", located);
        assert_eq!(
            violation.to_string(),
            "file: src/lib.rs(10:5) `app::configure`: contract violated in `ConstrainedValue::new`. less(5)(7) is false."
        );
    }

    #[test]
    fn test_contract_violation_matches_violation() {
        let violation = Violation::new("", "non_empty", "ConstrainedValue::new", location());
        let owned = ContractViolation::from(Violation::new("", "non_empty", "ConstrainedValue::new", location()));

        assert_eq!(owned.to_string(), violation.to_string());
        assert_eq!(owned.value(), "");
        assert_eq!(owned.predicate(), "non_empty");
        assert_eq!(owned.caller(), "ConstrainedValue::new");
        assert_eq!(owned.location(), &location());
    }

    #[test]
    fn test_reject_returns_violation() {
        let err = ViolationPolicy::<i32>::on_violation(
            &Reject,
            Violation::new(&-1, "greater(0)", "ConstrainedValue::new", location()),
        );
        assert_eq!(err.value(), "-1");
        assert_eq!(err.predicate(), "greater(0)");
    }

    #[test]
    fn test_panic_payload_is_contract_violation() {
        let result = std::panic::catch_unwind(|| {
            let _: Infallible = ViolationPolicy::<i32>::on_violation(
                &Panic,
                Violation::new(&-1, "greater(0)", "ConstrainedValue::new", location()),
            );
        });

        let payload = result.unwrap_err();
        let violation = payload.downcast_ref::<ContractViolation>().unwrap();
        assert_eq!(violation.value(), "-1");
    }

    #[test]
    fn test_caller_location() {
        #[track_caller]
        fn capture() -> SourceLocation {
            SourceLocation::caller()
        }

        let (here, line) = (capture(), line!());
        assert_eq!(here.file(), file!());
        assert_eq!(here.line(), line);
        assert_eq!(here.function(), None);
    }

    #[test]
    fn test_source_location_macro() {
        let here = crate::source_location!();
        assert_eq!(here.file(), file!());
        assert_eq!(
            here.function(),
            Some("constrained_value::policy::tests::test_source_location_macro")
        );
    }
}
