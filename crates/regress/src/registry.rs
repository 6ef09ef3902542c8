//! Provider registry and the orchestration loop.
//!
//! The orchestrator validates every scope up front, then runs the providers
//! strictly in registration order, each inside its own scope, folding their
//! tallies. Unless the run is quick, the extra passes follow. The visual
//! battery runs last and is reported separately.

use std::io::Write;

use tracing::{info, info_span, instrument};
use uuid::Uuid;

use crate::config::{Capabilities, RunContext};
use crate::environment::Environment;
use crate::errors::RegressError;
use crate::extra::{census_verification_pass, link_structure_pass};
use crate::provider::TestProvider;
use crate::report::{ProviderOutcome, RunReport};
use crate::result::TestResult;
use crate::suite;
use crate::visual::VisualRunner;

/// Providers in registration order, with unique names.
#[derive(Debug, Default)]
pub struct Registry {
    providers: Vec<TestProvider>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: TestProvider) -> Result<(), RegressError> {
        if self.providers.iter().any(|p| p.name() == provider.name()) {
            return Err(RegressError::DuplicateProvider {
                name: provider.name().to_string(),
            });
        }
        self.providers.push(provider);
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(TestProvider::name).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Drives a run: registry, extra passes, visual battery.
pub struct Orchestrator {
    registry: Registry,
    extra: Vec<TestProvider>,
    visual: VisualRunner,
    env: Environment,
}

impl Orchestrator {
    /// An orchestrator with no extra passes and no visual backend.
    pub fn new(registry: Registry, env: Environment) -> Self {
        Self {
            registry,
            extra: Vec::new(),
            visual: VisualRunner::unavailable(),
            env,
        }
    }

    /// The standard suite for this build's capabilities.
    pub fn standard(caps: &Capabilities) -> Result<Self, RegressError> {
        let registry = suite::standard_registry(caps)?;
        Ok(Self::new(registry, Environment::new(caps.algebra))
            .with_extra_pass(census_verification_pass())
            .with_extra_pass(link_structure_pass())
            .with_visual(VisualRunner::detect(caps, suite::render_modules())))
    }

    #[must_use]
    pub fn with_extra_pass(mut self, pass: TestProvider) -> Self {
        self.extra.push(pass);
        self
    }

    #[must_use]
    pub fn with_visual(mut self, visual: VisualRunner) -> Self {
        self.visual = visual;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The environment between runs; always back at its baseline.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    fn validate(&self) -> Result<(), RegressError> {
        for provider in self.registry.providers.iter().chain(&self.extra) {
            self.env
                .validate(provider.overrides())
                .map_err(|e| RegressError::config(provider.name(), e))?;
        }
        self.env
            .validate(self.visual.overrides())
            .map_err(|e| RegressError::config("visual", e))?;
        Ok(())
    }

    /// Execute the full run.
    #[instrument(skip_all)]
    pub fn run(&mut self, ctx: &mut RunContext<'_>) -> Result<RunReport, RegressError> {
        let run_id = Uuid::new_v4();
        let _span = info_span!("run", %run_id).entered();

        self.validate()?;

        let mut providers = Vec::with_capacity(self.registry.len());
        let mut doctests = TestResult::ZERO;
        for provider in &mut self.registry.providers {
            let result = run_provider(provider, &mut self.env, ctx)?;
            info!(provider = provider.name(), %result, "provider finished");
            providers.push(ProviderOutcome {
                name: provider.name().to_string(),
                result,
            });
            doctests += result;
        }

        let mut extra = TestResult::ZERO;
        if !ctx.config.quick {
            writeln!(ctx.console)?;
            for pass in &mut self.extra {
                let result = run_provider(pass, &mut self.env, ctx)?;
                info!(pass = pass.name(), %result, "extra pass finished");
                extra += result;
            }
        }
        doctests += extra;

        writeln!(ctx.console, "All doctests:\n   {doctests}.")?;

        let visual = self.visual.run(&mut self.env, ctx)?;

        let report = RunReport {
            run_id,
            providers,
            doctests,
            extra,
            visual,
        };
        info!(grand = %report.grand(), "run finished");
        Ok(report)
    }
}

fn run_provider(
    provider: &mut TestProvider,
    env: &mut Environment,
    ctx: &mut RunContext<'_>,
) -> Result<TestResult, RegressError> {
    let guard = env
        .enter(provider.overrides())
        .map_err(|e| RegressError::config(provider.name(), e))?;
    provider.invoke(&guard, ctx)
}
