//! Test providers: the units the orchestrator registers and runs.
//!
//! A provider is either a set of documentation modules run by the generic
//! [`ExampleRunner`], or an opaque function that reports its own tally.
//! Either kind may carry environment overrides that the orchestrator applies
//! for the duration of the call.

use std::fmt;

use crate::config::RunContext;
use crate::doctest::DocModule;
use crate::environment::{Environment, Overrides};
use crate::errors::RegressError;
use crate::result::TestResult;
use crate::runner::ExampleRunner;

/// Signature of a self-reporting provider.
pub type ProviderFn = Box<dyn FnMut(&Environment, &mut RunContext<'_>) -> Result<TestResult, RegressError>>;

/// Documentation modules run by the example runner.
#[derive(Debug, Clone)]
pub struct ExampleProvider {
    pub name: String,
    pub modules: Vec<DocModule>,
    pub overrides: Overrides,
    pub runner: ExampleRunner,
}

/// A function that runs its own checks and returns a tally.
pub struct SelfReporting {
    pub name: String,
    pub overrides: Overrides,
    pub run: ProviderFn,
}

impl fmt::Debug for SelfReporting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfReporting")
            .field("name", &self.name)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum TestProvider {
    Examples(ExampleProvider),
    SelfReporting(SelfReporting),
}

impl TestProvider {
    pub fn examples(name: impl Into<String>, modules: Vec<DocModule>) -> Self {
        TestProvider::Examples(ExampleProvider {
            name: name.into(),
            modules,
            overrides: Overrides::none(),
            runner: ExampleRunner::default(),
        })
    }

    pub fn self_reporting(
        name: impl Into<String>,
        run: impl FnMut(&Environment, &mut RunContext<'_>) -> Result<TestResult, RegressError> + 'static,
    ) -> Self {
        TestProvider::SelfReporting(SelfReporting {
            name: name.into(),
            overrides: Overrides::none(),
            run: Box::new(run),
        })
    }

    /// Replace the provider's overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        match &mut self {
            TestProvider::Examples(p) => p.overrides = overrides,
            TestProvider::SelfReporting(p) => p.overrides = overrides,
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            TestProvider::Examples(p) => &p.name,
            TestProvider::SelfReporting(p) => &p.name,
        }
    }

    pub fn overrides(&self) -> &Overrides {
        match self {
            TestProvider::Examples(p) => &p.overrides,
            TestProvider::SelfReporting(p) => &p.overrides,
        }
    }

    /// Call the provider. The caller has already entered its scope.
    pub fn invoke(&mut self, env: &Environment, ctx: &mut RunContext<'_>) -> Result<TestResult, RegressError> {
        match self {
            TestProvider::Examples(p) => p.runner.run(&p.modules, env, ctx),
            TestProvider::SelfReporting(p) => (p.run)(env, ctx),
        }
    }
}
