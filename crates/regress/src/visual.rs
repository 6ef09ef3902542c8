//! The optional graphics battery.
//!
//! Runs only when a rendering backend is available. Without one the battery
//! contributes a zero tally and a warning; a missing backend is never an
//! error.

use std::io::Write;
use std::time::Duration;

use manifold_kernel::Precision;
use tracing::{info, instrument, warn};

use crate::config::{Capabilities, RunContext};
use crate::doctest::DocModule;
use crate::environment::{Environment, FieldBackend, Overrides};
use crate::errors::RegressError;
use crate::render::{RenderBackend, Scene, SceneKind, SvgBackend};
use crate::result::TestResult;
use crate::runner::ExampleRunner;

/// How long windows stay open when the user did not ask to keep them.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_secs(7);

/// Name the battery's scope errors are reported under.
const VISUAL_PROVIDER: &str = "visual";

/// The windowing side of a graphical backend.
///
/// The `runtests` binary renders headless and attaches no toolkit, so the
/// wait and auto-close steps only run for embedders that supply one through
/// [`VisualRunner::with_toolkit`].
pub trait WindowToolkit {
    /// Block until the user closes the root window.
    fn wait_for_close(&mut self);

    /// Arrange for every window to be dismissed after `delay`.
    fn close_after(&mut self, delay: Duration);

    /// Process window events until no windows remain.
    fn main_loop(&mut self);
}

/// One rendering smoke test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmokeTest {
    pub kind: SceneKind,
    pub manifold: &'static str,
    pub precision: Precision,
}

/// Runs the render module's examples and the rendering smoke tests.
pub struct VisualRunner {
    backend: Option<Box<dyn RenderBackend>>,
    toolkit: Option<Box<dyn WindowToolkit>>,
    overrides: Overrides,
    docs: Vec<DocModule>,
    runner: ExampleRunner,
}

impl VisualRunner {
    /// A runner with no backend; always yields a zero tally.
    pub fn unavailable() -> Self {
        Self {
            backend: None,
            toolkit: None,
            overrides: Overrides::none(),
            docs: Vec::new(),
            runner: ExampleRunner::default(),
        }
    }

    pub fn new(backend: Box<dyn RenderBackend>, docs: Vec<DocModule>) -> Self {
        Self {
            backend: Some(backend),
            ..Self::unavailable()
        }
        .with_docs(docs)
    }

    /// The runner this build supports.
    pub fn detect(caps: &Capabilities, docs: Vec<DocModule>) -> Self {
        if !caps.graphics {
            return Self::unavailable();
        }
        let runner = Self::new(Box::new(SvgBackend::default()), docs);
        if caps.algebra {
            runner.with_overrides(Overrides::none().field(FieldBackend::Algebra))
        } else {
            runner
        }
    }

    #[must_use]
    pub fn with_toolkit(mut self, toolkit: Box<dyn WindowToolkit>) -> Self {
        self.toolkit = Some(toolkit);
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_docs(mut self, docs: Vec<DocModule>) -> Self {
        self.docs = docs;
        self
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The smoke tests a run with `ctx`'s configuration attempts: the double
    /// precision scenes, then the high precision ones. The browser has no
    /// high precision variant.
    pub fn smoke_tests(&self, ctx: &RunContext<'_>) -> Vec<SmokeTest> {
        let modern_gl = self.backend.as_ref().is_some_and(|b| b.supports_modern_gl());
        let inside_view = ctx.config.modern_gl && modern_gl && !ctx.config.quick;

        let mut tests = Vec::new();
        for precision in [Precision::Double, Precision::High] {
            let mut push = |kind: SceneKind, manifold: &'static str| {
                tests.push(SmokeTest {
                    kind,
                    manifold,
                    precision,
                })
            };
            push(SceneKind::DirichletDomain, "m004");
            push(SceneKind::CuspNeighborhood, "m125");
            if inside_view {
                push(SceneKind::InsideView, "m004");
            }
            if precision == Precision::Double && !ctx.config.quick {
                push(SceneKind::Browser, "4_1");
            }
        }
        tests
    }

    /// Run the battery inside its scope.
    #[instrument(skip_all)]
    pub fn run(&mut self, env: &mut Environment, ctx: &mut RunContext<'_>) -> Result<TestResult, RegressError> {
        let Some(backend) = self.backend.as_deref() else {
            warn!("no graphics backend available, skipping visual tests");
            writeln!(ctx.console, "***Warning***: graphics backend not available, visual tests skipped")?;
            return Ok(TestResult::ZERO);
        };

        writeln!(ctx.console, "Testing graphics ...")?;
        let smoke = self.smoke_tests(ctx);
        let guard = env
            .enter(&self.overrides)
            .map_err(|e| RegressError::config(VISUAL_PROVIDER, e))?;

        let mut result = self.runner.run(&self.docs, &guard, ctx)?;
        for test in smoke {
            let rendered = Scene::build(test.kind, ctx.engine, test.manifold, guard.accuracy())
                .map_err(RegressError::from)
                .and_then(|scene| backend.render(&scene.with_precision(test.precision)));
            if let Err(e) = &rendered {
                warn!(scene = %test.kind, manifold = test.manifold, precision = %test.precision, error = %e, "render failed");
            }
            result = result.record(rendered.is_ok());
        }
        drop(guard);

        if let Some(toolkit) = self.toolkit.as_mut() {
            if ctx.config.windows {
                writeln!(ctx.console, "Close the root window to finish.")?;
                toolkit.wait_for_close();
            } else {
                writeln!(ctx.console, "The windows will close in a few seconds.")?;
                writeln!(ctx.console, "Specify -w or --windows to avoid this.")?;
                toolkit.close_after(AUTO_CLOSE_DELAY);
                toolkit.main_loop();
            }
        }

        info!(backend = backend.name(), %result, "visual tests finished");
        Ok(result)
    }
}
