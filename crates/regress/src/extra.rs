//! Additional whole-census passes run after the registry unless in quick mode.

use manifold_kernel::hyperbolic::ptolemy_coordinates_per_tetrahedron;
use tracing::{info, warn};

use crate::config::RunContext;
use crate::database::Resolver;
use crate::environment::Environment;
use crate::errors::RegressError;
use crate::provider::TestProvider;
use crate::result::TestResult;

/// Checks Ptolemy coordinate counts of every census manifold with the
/// enriched resolver substituted into the database.
pub fn census_verification_pass() -> TestProvider {
    TestProvider::self_reporting("census_verification", verify_census)
}

/// Validates the PD-code structure of every link in the link table.
pub fn link_structure_pass() -> TestProvider {
    TestProvider::self_reporting("link_structure", verify_links)
}

fn verify_census(_env: &Environment, ctx: &mut RunContext<'_>) -> Result<TestResult, RegressError> {
    let engine = ctx.engine;
    let names = engine.census();
    let per_tet_2 = ptolemy_coordinates_per_tetrahedron(2)?;
    let per_tet_3 = ptolemy_coordinates_per_tetrahedron(3)?;

    let result = ctx.database.with_resolver(Resolver::Enriched, |db| {
        let mut result = TestResult::ZERO;
        for name in &names {
            let entry = match db.lookup(engine, name) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(manifold = %name, error = %e, "census lookup failed");
                    result = result.record(false);
                    continue;
                }
            };
            let tets = u64::from(entry.record.num_tetrahedra);
            for (n, per_tet) in [(2, per_tet_2), (3, per_tet_3)] {
                let ok = entry
                    .ptolemy_coordinates(n)
                    .is_ok_and(|count| count == per_tet * tets);
                if !ok {
                    warn!(manifold = %name, n, "Ptolemy coordinate count mismatch");
                }
                result = result.record(ok);
            }
            result = result.record(entry.record.volume > 0.0);
        }
        result
    });

    info!(%result, "census verification pass");
    Ok(result)
}

fn verify_links(_env: &Environment, ctx: &mut RunContext<'_>) -> Result<TestResult, RegressError> {
    let census = ctx.engine.census();
    let mut result = TestResult::ZERO;
    for name in ctx.engine.links() {
        let link = ctx.engine.link(&name)?;
        let problems = link.structural_problems();
        for problem in &problems {
            warn!(link = %name, problem = %problem, "link structure");
        }
        result = result.record(problems.is_empty());

        if let Some(exterior) = &link.exterior {
            let known = census.contains(exterior);
            if !known {
                warn!(link = %name, exterior = %exterior, "link exterior missing from census");
            }
            result = result.record(known);
        }
    }
    info!(%result, "link structure pass");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use manifold_kernel::CensusKernel;

    #[test]
    fn test_census_pass_counts_three_checks_per_manifold() {
        let engine = CensusKernel::new();
        let mut console = Vec::new();
        let mut ctx = RunContext::new(&engine, &mut console, RunConfig::default());
        let env = Environment::default();
        let result = verify_census(&env, &mut ctx).unwrap();
        assert_eq!(result, TestResult::passed(12));
        assert_eq!(ctx.database.resolver(), Resolver::Kernel);
    }

    #[test]
    fn test_link_pass() {
        let engine = CensusKernel::new();
        let mut console = Vec::new();
        let mut ctx = RunContext::new(&engine, &mut console, RunConfig::default());
        let result = verify_links(&Environment::default(), &mut ctx).unwrap();
        // three diagrams plus the one exterior in the census
        assert_eq!(result, TestResult::passed(4));
    }
}
