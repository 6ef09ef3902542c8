//! The standard test suite: documentation modules of every subsystem and the
//! registry that runs them.

mod checker;
mod kernel;
mod links;
mod ptolemy;
mod raytracing;
mod render;
mod snap;
mod verify;

use crate::config::{Capabilities, RunContext};
use crate::doctest::DocModule;
use crate::environment::{Environment, FieldBackend, Overrides};
use crate::errors::RegressError;
use crate::provider::TestProvider;
use crate::registry::Registry;
use crate::result::TestResult;
use crate::runner::ExampleRunner;

pub use checker::checker_modules;
pub use kernel::{database_modules, kernel_hp_modules, kernel_modules, number_modules, snappy_modules};
pub use links::links_modules;
pub use ptolemy::ptolemy_modules;
pub use raytracing::raytracing_modules;
pub use render::render_modules;
pub use snap::snap_modules;
pub use verify::verify_modules;

/// Full precision natively, algebra field conversion when the backend is on.
fn native_or_algebra(caps: &Capabilities) -> Overrides {
    if caps.algebra {
        Overrides::none().field(FieldBackend::Algebra)
    } else {
        Overrides::none().accuracy(None)
    }
}

/// Algebra field conversion when the backend is on, otherwise no overrides.
fn algebra_only(caps: &Capabilities) -> Overrides {
    if caps.algebra {
        Overrides::none().field(FieldBackend::Algebra)
    } else {
        Overrides::none()
    }
}

/// Run documentation modules with the default runner. Shared by the
/// self-reporting providers, which add their own direct checks on top.
pub(crate) fn run_docs(
    modules: &[DocModule],
    env: &Environment,
    ctx: &mut RunContext<'_>,
) -> Result<TestResult, RegressError> {
    ExampleRunner::default().run(modules, env, ctx)
}

/// The standard registry, in execution order.
pub fn standard_registry(caps: &Capabilities) -> Result<Registry, RegressError> {
    let mut registry = Registry::new();

    registry.register(checker::provider())?;
    if !caps.algebra {
        registry.register(
            TestProvider::examples("number", number_modules()).with_overrides(Overrides::none().accuracy(None)),
        )?;
    }
    registry.register(TestProvider::examples("kernel", kernel_modules()))?;
    registry.register(TestProvider::examples("kernel_hp", kernel_hp_modules()))?;
    registry.register(TestProvider::examples("database", database_modules()))?;
    registry.register(TestProvider::examples("snappy", snappy_modules()).with_overrides(native_or_algebra(caps)))?;
    registry.register(snap::provider().with_overrides(algebra_only(caps)))?;
    if caps.raytracing {
        registry.register(
            TestProvider::examples("raytracing", raytracing_modules()).with_overrides(algebra_only(caps)),
        )?;
    }
    registry.register(ptolemy::provider())?;
    registry.register(links::provider())?;
    registry.register(verify::provider().with_overrides(native_or_algebra(caps)))?;

    Ok(registry)
}
