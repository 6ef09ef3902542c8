//! Tests for scope entry and restoration on every exit path, and for the
//! algebra of tallies.

use std::panic::{catch_unwind, AssertUnwindSafe};

use proptest::prelude::*;
use regress::environment::{SettingValue, ACCURACY_FOR_TESTING, FIELD_CONVERSION};
use regress::{ConfigError, Environment, FieldBackend, Overrides, TestResult};

fn arb_result() -> impl Strategy<Value = TestResult> {
    (0usize..1000, 0usize..1000).prop_map(|(a, b)| TestResult::new(a.min(b), a.max(b)).unwrap())
}

fn arb_overrides() -> impl Strategy<Value = Overrides> {
    (
        proptest::option::of(proptest::option::of(1u32..20)),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(accuracy, algebra)| {
            let mut o = Overrides::none();
            if let Some(digits) = accuracy {
                o = o.accuracy(digits);
            }
            if let Some(algebra) = algebra {
                o = o.field(if algebra { FieldBackend::Algebra } else { FieldBackend::Native });
            }
            o
        })
}

proptest! {
    #[test]
    fn prop_combine_is_commutative(a in arb_result(), b in arb_result()) {
        prop_assert_eq!(a + b, b + a);
    }

    #[test]
    fn prop_combine_is_associative(a in arb_result(), b in arb_result(), c in arb_result()) {
        prop_assert_eq!((a + b) + c, a + (b + c));
    }

    #[test]
    fn prop_zero_is_identity(a in arb_result()) {
        prop_assert_eq!(a + TestResult::ZERO, a);
    }

    #[test]
    fn prop_sum_matches_fieldwise_addition(results in proptest::collection::vec(arb_result(), 0..20)) {
        let total: TestResult = results.iter().copied().sum();
        prop_assert_eq!(total.failures(), results.iter().map(|r| r.failures()).sum::<usize>());
        prop_assert_eq!(total.total(), results.iter().map(|r| r.total()).sum::<usize>());
        prop_assert!(total.failures() <= total.total());
    }

    #[test]
    fn prop_scope_round_trip(overrides in arb_overrides()) {
        let mut env = Environment::new(true);
        let before = env.clone();
        {
            let _guard = env.enter(&overrides).unwrap();
        }
        prop_assert_eq!(env, before);
    }
}

#[test]
fn test_restored_after_normal_exit() {
    let mut env = Environment::default();
    let inside = env
        .with_scope(&Overrides::none().accuracy(None), |e| e.accuracy())
        .unwrap();
    assert_eq!(inside, None);
    assert_eq!(env.accuracy(), Some(8));
}

#[test]
fn test_restored_after_error_exit() {
    fn body(env: &mut Environment) -> Result<(), String> {
        let guard = env.enter(&Overrides::none().accuracy(Some(3))).map_err(|e| e.to_string())?;
        if guard.accuracy() == Some(3) {
            return Err("body failed".to_string());
        }
        Ok(())
    }

    let mut env = Environment::default();
    assert!(body(&mut env).is_err());
    assert_eq!(env, Environment::default());
}

#[test]
fn test_restored_after_panic() {
    let mut env = Environment::new(true);
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let _guard = env
            .enter(&Overrides::none().accuracy(None).field(FieldBackend::Algebra))
            .unwrap();
        panic!("example body panicked");
    }));
    assert!(outcome.is_err());
    assert_eq!(env.accuracy(), Some(8));
    assert_eq!(env.field(), FieldBackend::Native);
}

#[test]
fn test_sequential_scopes_do_not_leak() {
    let mut env = Environment::default();
    let first = env
        .with_scope(&Overrides::none().accuracy(Some(4)), |e| e.accuracy())
        .unwrap();
    let second = env.with_scope(&Overrides::none(), |e| e.accuracy()).unwrap();
    assert_eq!(first, Some(4));
    assert_eq!(second, Some(8));
}

#[test]
fn test_config_errors_leave_environment_untouched() {
    let mut env = Environment::new(false);
    let cases = [
        (
            Overrides::none().set("precision", SettingValue::Accuracy(Some(4))),
            "unknown setting: precision",
        ),
        (
            Overrides::none().set(ACCURACY_FOR_TESTING, SettingValue::Field(FieldBackend::Native)),
            "setting accuracy_for_testing does not accept field backend native",
        ),
        (
            Overrides::none().set(FIELD_CONVERSION, SettingValue::Accuracy(None)),
            "setting field_conversion does not accept full precision",
        ),
        (
            Overrides::none().accuracy(Some(4)).field(FieldBackend::Algebra),
            "field conversion 'algebra' requested but the algebra backend is not active",
        ),
    ];
    for (overrides, message) in cases {
        let err: ConfigError = env.enter(&overrides).err().unwrap();
        assert_eq!(err.to_string(), message);
        assert_eq!(env, Environment::new(false), "{message}");
    }
}
