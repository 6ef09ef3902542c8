use manifold_kernel::hyperbolic::ptolemy_coordinates_per_tetrahedron;

use crate::doctest::{DocModule, DocUnit};
use crate::provider::TestProvider;
use crate::result::TestResult;

const PTOLEMY: &str = r#"
    Ptolemy coordinates of the SL(N) variety, before edge identifications.

        >>> ptolemy_coordinates m004 2
        12
        >>> ptolemy_coordinates m125 3
        64
        >>> ptolemy_coordinates m004 1
        Error: invalid argument: Ptolemy varieties need N >= 2, got 1
"#;

pub fn ptolemy_modules() -> Vec<DocModule> {
    vec![DocModule::new(
        "ptolemy",
        vec![DocUnit::new("ptolemy", PTOLEMY)],
    )]
}

/// Per-tetrahedron counts are `C(N+3, 3) - 4`.
fn per_tetrahedron_checks() -> TestResult {
    [(2, 6), (3, 16), (4, 31)]
        .into_iter()
        .fold(TestResult::ZERO, |acc, (n, expected)| {
            acc.record(ptolemy_coordinates_per_tetrahedron(n).ok() == Some(expected))
        })
}

pub fn provider() -> TestProvider {
    TestProvider::self_reporting("ptolemy", |env, ctx| {
        Ok(super::run_docs(&ptolemy_modules(), env, ctx)? + per_tetrahedron_checks())
    })
}
