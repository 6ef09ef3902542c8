use tracing::warn;

use crate::doctest::{DocModule, DocUnit};
use crate::provider::TestProvider;
use crate::result::TestResult;

const VERIFY: &str = r#"
    Verified computations.

        >>> verify_hyperbolicity m004
        True
        >>> verify_volume m004 2.0298832128
        True
        >>> verify_volume m004 2.03
        False
        >>> volume m125
        3.663862376708876
"#;

pub fn verify_modules() -> Vec<DocModule> {
    vec![DocModule::new("verify", vec![DocUnit::new("verify", VERIFY)])]
}

pub fn provider() -> TestProvider {
    TestProvider::self_reporting("verify", |env, ctx| {
        let mut result = super::run_docs(&verify_modules(), env, ctx)?;
        for name in ctx.engine.census() {
            let volume = ctx.engine.volume(&name)?;
            let positive = volume.is_finite() && volume > 0.0;
            if !positive {
                warn!(manifold = %name, volume, "census manifold is not hyperbolic");
            }
            result += TestResult::ZERO.record(positive);
        }
        Ok(result)
    })
}
