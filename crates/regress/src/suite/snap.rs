use crate::doctest::{DocModule, DocUnit};
use crate::provider::TestProvider;

const SNAP: &str = r#"
    Exact trace fields. The algebra backend presents them as number fields.

        >>> trace_field m004  # doctest: +NATIVE
        x^2 - x + 1
        >>> trace_field m004  # doctest: +ALGEBRA
        Number Field in x with defining polynomial x^2 - x + 1
        >>> trace_field m129  # doctest: +NATIVE
        x^2 + 1
        >>> trace_field m129  # doctest: +ALGEBRA
        Number Field in x with defining polynomial x^2 + 1
"#;

pub fn snap_modules() -> Vec<DocModule> {
    vec![DocModule::new("snap", vec![DocUnit::new("snap", SNAP)])]
}

pub fn provider() -> TestProvider {
    TestProvider::self_reporting("snap", |env, ctx| super::run_docs(&snap_modules(), env, ctx))
}
