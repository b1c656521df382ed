//! Integration tests for the violation policies

use std::env;
use std::panic::{self, AssertUnwindSafe};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use constrained_value::constant::Int;
use constrained_value::policy::{Ignore, Panic, Reject, Violation, ViolationPolicy};
use constrained_value::predicate::{self, Predicate};
use constrained_value::{source_location, Bounded, ConstrainedValue, ContractViolation, Positive};

const ABORT_CHILD: &str = "CONSTRAINED_VALUE_ABORT_CHILD";

static VIOLATIONS: AtomicUsize = AtomicUsize::new(0);

/// Counts calls, then rejects.
#[derive(Default)]
struct Counting;

impl<T: ?Sized> ViolationPolicy<T> for Counting {
    type Error = ();

    fn on_violation(&self, _violation: Violation<'_, T>) {
        VIOLATIONS.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fails if evaluated more than once per check.
#[derive(Debug, Default)]
struct CountingPositive;

static EVALUATIONS: AtomicUsize = AtomicUsize::new(0);

impl Predicate<i32> for CountingPositive {
    fn test(&self, value: &i32) -> bool {
        EVALUATIONS.fetch_add(1, Ordering::SeqCst);
        *value > 0
    }
}

#[test]
fn test_panic_policy_leaves_value_untouched() {
    type Rate = Positive<f64, Panic>;

    let mut rate = Rate::new(2.0);

    let payload = panic::catch_unwind(AssertUnwindSafe(|| rate.set(0.0))).unwrap_err();
    let violation = payload
        .downcast_ref::<ContractViolation>()
        .expect("payload is a ContractViolation");

    assert_eq!(*rate, 2.0);
    assert_eq!(violation.caller(), "ConstrainedValue::set");
    assert_eq!(violation.predicate(), "greater(0)");
    assert_eq!(violation.location().file(), file!());
}

#[test]
fn test_reject_policy_reports_location_of_call() {
    type Percent = Bounded<u8, Int<0>, Int<100>, Reject>;

    let line = line!() + 1;
    let err = Percent::try_new(101).unwrap_err();

    assert_eq!(err.location().file(), file!());
    assert_eq!(err.location().line(), line);
    assert_eq!(err.predicate(), "less_equal(100)");
    assert_eq!(err.value(), "101");
    assert!(err
        .to_string()
        .ends_with("contract violated in `ConstrainedValue::new`. less_equal(100)(101) is false."));
}

#[test]
fn test_explicit_location_names_the_function() {
    type Count = ConstrainedValue<i32, predicate::Positive, Reject>;

    let err = Count::try_new_at(0, source_location!()).unwrap_err();

    let function = err.location().function().unwrap();
    assert!(function.ends_with("test_explicit_location_names_the_function"));
    assert!(err.to_string().contains("test_explicit_location_names_the_function`"));
}

#[test]
fn test_policy_runs_once_per_violation() {
    type Count = ConstrainedValue<i32, predicate::Positive, Counting>;

    let before = VIOLATIONS.load(Ordering::SeqCst);
    assert!(Count::try_new(0).is_err());
    assert_eq!(VIOLATIONS.load(Ordering::SeqCst), before + 1);

    let mut count = Count::try_new(1).unwrap();
    assert!(count.try_set(-1).is_err());
    assert_eq!(VIOLATIONS.load(Ordering::SeqCst), before + 2);

    // queries never reach the policy
    assert!(!Count::is_valid(&-1));
    assert_eq!(VIOLATIONS.load(Ordering::SeqCst), before + 2);
}

#[test]
fn test_predicate_evaluated_once_per_check() {
    type Count = ConstrainedValue<i32, CountingPositive, Ignore>;

    let before = EVALUATIONS.load(Ordering::SeqCst);
    let mut count = Count::try_new(1).unwrap();
    assert!(count.try_set(0).is_err());
    assert_eq!(EVALUATIONS.load(Ordering::SeqCst), before + 2);
}

#[test]
fn test_default_policy_aborts_with_diagnostic() {
    let exe = env::current_exe().unwrap();
    let output = Command::new(exe)
        .args(["--exact", "abort_child", "--nocapture", "--test-threads=1"])
        .env(ABORT_CHILD, "1")
        .output()
        .unwrap();

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("contract violated in `ConstrainedValue::new`. greater(0)(-7) is false."),
        "stderr was: {stderr}"
    );
    assert!(stderr.contains(file!()), "stderr was: {stderr}");
}

/// Runs only as the child of `test_default_policy_aborts_with_diagnostic`.
#[test]
fn abort_child() {
    if env::var_os(ABORT_CHILD).is_none() {
        return;
    }

    type Count = Positive<i32>;
    let count = Count::new(-7);
    unreachable!("aborted before constructing {count:?}");
}

#[cfg(feature = "tracing")]
mod tracing_policy {
    use constrained_value::constant::Zero;
    use constrained_value::policy::LogAndReject;
    use constrained_value::predicate::GreaterEqual;
    use constrained_value::ConstrainedValue;
    use tracing_test::traced_test;

    type Balance = ConstrainedValue<i64, GreaterEqual<Zero>, LogAndReject>;

    #[test]
    #[traced_test]
    fn test_log_and_reject_emits_structured_event() {
        let mut balance = Balance::try_new(10).unwrap();

        let err = balance.try_set(-20).unwrap_err();

        assert_eq!(*balance, 10);
        assert_eq!(err.value(), "-20");
        assert!(logs_contain("contract violated"));
        assert!(logs_contain("caller=\"ConstrainedValue::set\""));
        assert!(logs_contain("predicate=\"greater_equal(0)\""));
        assert!(logs_contain("value=-20"));
    }

    #[test]
    #[traced_test]
    fn test_log_and_reject_is_silent_on_success() {
        assert!(Balance::try_new(0).is_ok());
        assert!(!logs_contain("contract violated"));
    }
}
