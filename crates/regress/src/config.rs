//! Run configuration, optional capabilities, and the per-run context.

use std::io::Write;

use manifold_kernel::ManifoldEngine;

use crate::database::ManifoldDatabase;

/// Options parsed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Echo every example and print mismatch diagnostics.
    pub verbose: bool,
    /// Skip the extra passes and the slow visual checks.
    pub quick: bool,
    /// Keep visual windows open until the user closes them.
    pub windows: bool,
    /// Run checks that need the modern OpenGL code path.
    pub modern_gl: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            quick: false,
            windows: false,
            modern_gl: true,
        }
    }
}

impl RunConfig {
    /// Defaults minus the extra passes and slow visual checks.
    pub fn quick() -> Self {
        Self {
            quick: true,
            ..Self::default()
        }
    }

    /// Defaults with per-example output.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }
}

/// Optional subsystems compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub algebra: bool,
    pub raytracing: bool,
    pub graphics: bool,
}

impl Capabilities {
    /// Capabilities from the enabled cargo features.
    pub fn detect() -> Self {
        Self {
            algebra: cfg!(feature = "algebra"),
            raytracing: cfg!(feature = "raytracing"),
            graphics: cfg!(feature = "graphics"),
        }
    }

    /// Nothing optional.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Everything a provider may touch during a run, except the environment,
/// which the orchestrator lends out one scope at a time.
pub struct RunContext<'a> {
    pub engine: &'a dyn ManifoldEngine,
    pub database: ManifoldDatabase,
    /// Where report text and verbose diagnostics go.
    pub console: &'a mut dyn Write,
    pub config: RunConfig,
}

impl<'a> RunContext<'a> {
    pub fn new(engine: &'a dyn ManifoldEngine, console: &'a mut dyn Write, config: RunConfig) -> Self {
        Self {
            engine,
            database: ManifoldDatabase::new(),
            console,
            config,
        }
    }
}
