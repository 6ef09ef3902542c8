//! Tests for the visual battery with a recording window toolkit.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use manifold_kernel::{CensusKernel, Precision};
use regress::render::{RenderBackend, Scene, SceneKind, SvgBackend};
use regress::suite::render_modules;
use regress::visual::AUTO_CLOSE_DELAY;
use regress::{
    Capabilities, Environment, RegressError, RunConfig, RunContext, TestResult, VisualRunner, WindowToolkit,
};

#[derive(Debug, Clone, PartialEq)]
enum ToolkitCall {
    WaitForClose,
    CloseAfter(Duration),
    MainLoop,
}

struct RecordingToolkit(Rc<RefCell<Vec<ToolkitCall>>>);

impl WindowToolkit for RecordingToolkit {
    fn wait_for_close(&mut self) {
        self.0.borrow_mut().push(ToolkitCall::WaitForClose);
    }

    fn close_after(&mut self, delay: Duration) {
        self.0.borrow_mut().push(ToolkitCall::CloseAfter(delay));
    }

    fn main_loop(&mut self) {
        self.0.borrow_mut().push(ToolkitCall::MainLoop);
    }
}

/// Renders nothing but the Dirichlet domain.
struct DirichletOnly;

impl RenderBackend for DirichletOnly {
    fn name(&self) -> &str {
        "dirichlet-only"
    }

    fn supports_modern_gl(&self) -> bool {
        false
    }

    fn render(&self, scene: &Scene) -> Result<String, RegressError> {
        match scene.kind {
            SceneKind::DirichletDomain => SvgBackend::default().render(scene),
            other => Err(RegressError::Render {
                reason: format!("{other} not supported"),
            }),
        }
    }
}

fn run(visual: &mut VisualRunner, env: &mut Environment, config: RunConfig) -> (TestResult, String) {
    let engine = CensusKernel::new();
    let mut console = Vec::new();
    let result = {
        let mut ctx = RunContext::new(&engine, &mut console, config);
        visual.run(env, &mut ctx).unwrap()
    };
    (result, String::from_utf8(console).unwrap())
}

#[test]
fn test_no_backend_is_zero_with_warning() {
    let mut visual = VisualRunner::detect(&Capabilities::minimal(), render_modules());
    assert!(!visual.is_available());
    let (result, console) = run(&mut visual, &mut Environment::default(), RunConfig::default());
    assert_eq!(result, TestResult::ZERO);
    assert!(console.starts_with("***Warning***"), "console: {console}");
}

#[test]
fn test_full_battery_passes() {
    let mut visual = VisualRunner::new(Box::new(SvgBackend::default()), render_modules());
    let (result, console) = run(&mut visual, &mut Environment::default(), RunConfig::default());
    // four render examples, four double and three high precision smoke tests
    assert_eq!(result, TestResult::passed(11));
    assert!(console.starts_with("Testing graphics ..."));
}

#[test]
fn test_quick_and_skip_modern_gl_drop_smoke_tests() {
    let mut visual = VisualRunner::new(Box::new(SvgBackend::default()), Vec::new());
    let (quick, _) = run(&mut visual, &mut Environment::default(), RunConfig::quick());
    assert_eq!(quick, TestResult::passed(4), "Dirichlet domain and cusp at both precisions");

    let no_gl = RunConfig {
        modern_gl: false,
        ..RunConfig::default()
    };
    let (without_gl, _) = run(&mut visual, &mut Environment::default(), no_gl);
    assert_eq!(without_gl, TestResult::passed(5), "no inside view");
}

#[test]
fn test_smoke_tests_cover_both_precisions() {
    let visual = VisualRunner::new(Box::new(SvgBackend::default()), Vec::new());
    let engine = CensusKernel::new();
    let mut console = Vec::new();
    let ctx = RunContext::new(&engine, &mut console, RunConfig::default());
    let listed: Vec<_> = visual
        .smoke_tests(&ctx)
        .into_iter()
        .map(|t| (t.kind, t.manifold, t.precision))
        .collect();
    assert_eq!(
        listed,
        vec![
            (SceneKind::DirichletDomain, "m004", Precision::Double),
            (SceneKind::CuspNeighborhood, "m125", Precision::Double),
            (SceneKind::InsideView, "m004", Precision::Double),
            (SceneKind::Browser, "4_1", Precision::Double),
            (SceneKind::DirichletDomain, "m004", Precision::High),
            (SceneKind::CuspNeighborhood, "m125", Precision::High),
            (SceneKind::InsideView, "m004", Precision::High),
        ]
    );
}

#[test]
fn test_failed_render_counts_as_failure() {
    let mut visual = VisualRunner::new(Box::new(DirichletOnly), Vec::new());
    let (result, _) = run(&mut visual, &mut Environment::default(), RunConfig::default());
    // the inside view is not attempted without modern GL support; the cusp
    // fails at both precisions and the browser once
    assert_eq!(result, TestResult::new(3, 5).unwrap());
}

#[test]
fn test_auto_close_without_windows_flag() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut visual = VisualRunner::new(Box::new(SvgBackend::default()), Vec::new())
        .with_toolkit(Box::new(RecordingToolkit(Rc::clone(&calls))));
    let (_, console) = run(&mut visual, &mut Environment::default(), RunConfig::default());

    assert_eq!(
        *calls.borrow(),
        vec![ToolkitCall::CloseAfter(AUTO_CLOSE_DELAY), ToolkitCall::MainLoop]
    );
    assert_eq!(AUTO_CLOSE_DELAY, Duration::from_secs(7));
    assert!(console.contains("The windows will close in a few seconds.\nSpecify -w or --windows to avoid this."));
}

#[test]
fn test_windows_flag_waits_for_close() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut visual = VisualRunner::new(Box::new(SvgBackend::default()), Vec::new())
        .with_toolkit(Box::new(RecordingToolkit(Rc::clone(&calls))));
    let config = RunConfig {
        windows: true,
        ..RunConfig::default()
    };
    let (_, console) = run(&mut visual, &mut Environment::default(), config);

    assert_eq!(*calls.borrow(), vec![ToolkitCall::WaitForClose]);
    assert!(console.contains("Close the root window to finish."));
}

#[test]
fn test_detected_runner_is_headless() {
    let mut visual = VisualRunner::detect(&all_graphics(), Vec::new());
    let config = RunConfig {
        windows: true,
        ..RunConfig::default()
    };
    let (result, console) = run(&mut visual, &mut Environment::default(), config);
    assert!(result.is_passing());
    assert!(!console.contains("Close the root window"));
    assert!(!console.contains("The windows will close"));
}

fn all_graphics() -> Capabilities {
    Capabilities {
        algebra: false,
        raytracing: false,
        graphics: true,
    }
}

#[test]
fn test_battery_scope_is_restored() {
    let caps = Capabilities {
        algebra: true,
        raytracing: false,
        graphics: true,
    };
    let mut visual = VisualRunner::detect(&caps, render_modules());
    let mut env = Environment::new(true);
    let (result, _) = run(&mut visual, &mut env, RunConfig::default());
    assert!(result.is_passing());
    assert_eq!(env, Environment::new(true));
}
