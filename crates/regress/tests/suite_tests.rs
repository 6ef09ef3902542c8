//! End-to-end runs of the standard suite.

use manifold_kernel::CensusKernel;
use regress::{Capabilities, Orchestrator, RunConfig, RunContext, RunReport};

fn run_standard(caps: &Capabilities, config: RunConfig) -> (RunReport, String) {
    let engine = CensusKernel::new();
    let mut orchestrator = Orchestrator::standard(caps).unwrap();
    let mut console = Vec::new();
    let report = {
        let mut ctx = RunContext::new(&engine, &mut console, config);
        orchestrator.run(&mut ctx).unwrap()
    };
    assert_eq!(
        orchestrator.environment(),
        &regress::Environment::new(caps.algebra),
        "environment back at baseline after the run"
    );
    (report, String::from_utf8(console).unwrap())
}

fn all() -> Capabilities {
    Capabilities {
        algebra: false,
        raytracing: true,
        graphics: true,
    }
}

#[test]
fn test_standard_suite_passes() {
    let (report, console) = run_standard(&all(), RunConfig::verbose());
    let failed: Vec<_> = report.providers.iter().filter(|p| !p.result.is_passing()).collect();
    assert!(failed.is_empty(), "failing providers: {failed:?}\n{console}");
    assert!(report.extra.is_passing() && report.extra.total() > 0);
    assert!(report.visual.is_passing() && report.visual.total() > 0);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_high_precision_kernel_runs_the_kernel_docs() {
    let (report, console) = run_standard(&all(), RunConfig::verbose());
    let outcome = |name: &str| {
        report
            .providers
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.result)
            .unwrap()
    };
    let (double, high) = (outcome("kernel"), outcome("kernel_hp"));
    assert!(high.is_passing(), "{console}");
    // the high precision unit has six examples, the binding included
    assert_eq!(high.total(), double.total() + 6);
}

#[test]
fn test_standard_suite_passes_with_algebra_backend() {
    let caps = Capabilities {
        algebra: true,
        ..all()
    };
    let (report, console) = run_standard(&caps, RunConfig::verbose());
    assert!(report.grand().is_passing(), "{console}");
    assert!(report.providers.iter().all(|p| p.name != "number"));
}

#[test]
fn test_standard_suite_minimal_build() {
    let (report, _) = run_standard(&Capabilities::minimal(), RunConfig::default());
    assert!(report.grand().is_passing());
    assert!(report.providers.iter().all(|p| p.name != "raytracing"));
    assert_eq!(report.visual.total(), 0);
}

#[test]
fn test_quick_run_skips_extra_passes() {
    let (full, _) = run_standard(&all(), RunConfig::default());
    let (quick, console) = run_standard(&all(), RunConfig::quick());
    assert_eq!(quick.extra.total(), 0);
    assert_eq!(quick.providers, full.providers, "registry providers unaffected by quick");
    assert!(quick.visual.total() < full.visual.total());
    assert!(console.contains("All doctests:\n   0 failures out of"));
}

#[test]
fn test_runs_are_deterministic() {
    let (first, first_console) = run_standard(&all(), RunConfig::verbose());
    let (second, second_console) = run_standard(&all(), RunConfig::verbose());
    assert_eq!(first.providers, second.providers);
    assert_eq!(first.grand(), second.grand());
    assert_eq!(first_console, second_console);
    assert_ne!(first.run_id, second.run_id);
}
