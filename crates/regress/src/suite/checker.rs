use crate::checker::OutputChecker;
use crate::doctest::{DocModule, DocUnit};
use crate::provider::TestProvider;
use crate::result::TestResult;

const NUMERIC_DIRECTIVE: &str = r#"
    Numbers in output are compared after rounding to the requested number
    of significant digits.

        >>> number 3.14160001  # doctest: +NUMERIC4
        3.14159265
        >>> number 2.5  # doctest: +NUMERIC2
        2.46

    Text around the numbers must still match exactly.

        >>> print volume is 2.02988 units  # doctest: +NUMERIC4
        volume is 2.0299 units
"#;

const DEFAULT_ACCURACY: &str = r#"
    Without a directive the active accuracy applies.

        >>> number 1.23456789012
        1.2345679
"#;

pub fn checker_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "numeric_output_checker",
        vec![
            DocUnit::new("NumericOutputChecker", NUMERIC_DIRECTIVE),
            DocUnit::new("NumericOutputChecker.accuracy", DEFAULT_ACCURACY),
        ],
    )]
}

/// Direct comparisons the documentation cannot express.
fn direct_checks() -> TestResult {
    let numeric = OutputChecker::numeric();
    let exact = OutputChecker::exact();
    TestResult::ZERO
        .record(numeric.check("3.14159265", "3.14160001", Some(4)))
        .record(!numeric.check("3.14159265", "3.14260001", Some(4)))
        .record(!exact.check("3.14159265", "3.14160001", Some(4)))
        .record(numeric.check("(0, 0.5)  \n\n", "(0, 0.500000001)", Some(8)))
}

pub fn provider() -> TestProvider {
    TestProvider::self_reporting("numeric_output_checker", |env, ctx| {
        Ok(super::run_docs(&checker_modules(), env, ctx)? + direct_checks())
    })
}
