//! Regression-test orchestrator for the census geometry engine.
//!
//! Runs the documentation examples of every subsystem, plus self-reporting
//! test functions, each under its own numeric/symbolic configuration scope,
//! and folds the outcomes into one `(failures, total)` tally.
//!
//! # Key Components
//!
//! - [`Environment`] and [`ScopeGuard`]: scoped overrides of accuracy and
//!   field conversion, restored on every exit path
//! - [`ExampleRunner`]: parses and runs documentation examples
//! - [`Orchestrator`]: registry, extra passes and visual battery
//! - [`VisualRunner`]: the optional graphics battery
//! - [`suite`]: the standard documentation modules and registry

pub mod checker;
pub mod cli;
pub mod config;
pub mod database;
pub mod doctest;
pub mod environment;
pub mod errors;
pub mod extra;
pub mod provider;
pub mod registry;
pub mod render;
pub mod report;
pub mod result;
pub mod runner;
pub mod session;
pub mod suite;
pub mod visual;

pub use checker::OutputChecker;
pub use config::{Capabilities, RunConfig, RunContext};
pub use database::{ManifoldDatabase, Resolver};
pub use doctest::{DocModule, DocUnit};
pub use environment::{Environment, FieldBackend, Overrides, ScopeGuard};
pub use errors::{ConfigError, RegressError};
pub use provider::TestProvider;
pub use registry::{Orchestrator, Registry};
pub use report::{RunReport, FATAL_EXIT_CODE};
pub use result::TestResult;
pub use runner::ExampleRunner;
pub use visual::{VisualRunner, WindowToolkit};
