//! Executes the examples of documentation modules and tallies the outcome.

use std::io::Write;

use tracing::{debug, instrument, warn};

use crate::checker::OutputChecker;
use crate::config::RunContext;
use crate::doctest::{exclusion_for, parse_examples, DocModule, Example};
use crate::environment::Environment;
use crate::errors::RegressError;
use crate::result::TestResult;
use crate::session::Session;

const RULE: &str = "**********************************************************************";

fn indented(text: &str) -> String {
    text.lines().map(|l| format!("    {l}\n")).collect()
}

/// Runs every example of a set of modules under the current environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleRunner {
    checker: OutputChecker,
}

impl ExampleRunner {
    pub fn new(checker: OutputChecker) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> OutputChecker {
        self.checker
    }

    /// Run all examples of `modules`. Each unit gets a fresh session.
    ///
    /// Mismatches and evaluation errors are counted, never returned; the only
    /// error is a console write failure.
    #[instrument(skip_all, fields(modules = modules.len()))]
    pub fn run(&self, modules: &[DocModule], env: &Environment, ctx: &mut RunContext<'_>) -> Result<TestResult, RegressError> {
        let mut result = TestResult::ZERO;
        for module in modules {
            for unit in &module.units {
                if let Some(exclusion) = exclusion_for(&unit.name) {
                    debug!(module = %module.name, unit = %unit.name, reason = exclusion.reason, "unit excluded");
                    continue;
                }

                let mut session = Session::new(ctx.engine, &ctx.database, env).with_precision(module.precision);
                for example in parse_examples(unit.text) {
                    if !example.options.applies(ctx.config.modern_gl, env.field()) {
                        continue;
                    }
                    let got = match session.eval(&example.source) {
                        Ok(out) => out,
                        Err(e) => format!("Error: {e}"),
                    };
                    let digits = example.options.numeric_digits.or(env.accuracy());
                    let passed = self.checker.check(&example.want, &got, digits);
                    result = result.record(passed);

                    if !passed {
                        warn!(module = %module.name, unit = %unit.name, line = example.line, "example failed");
                    }
                    if ctx.config.verbose {
                        report_example(ctx.console, &module.name, &unit.name, &example, &got, passed)?;
                    }
                }
            }
        }
        Ok(result)
    }
}

fn report_example(
    console: &mut dyn Write,
    module: &str,
    unit: &str,
    example: &Example,
    got: &str,
    passed: bool,
) -> Result<(), RegressError> {
    if passed {
        write!(console, "Trying:\n{}", indented(&example.source))?;
        if example.want.is_empty() {
            writeln!(console, "Expecting nothing")?;
        } else {
            write!(console, "Expecting:\n{}", indented(&example.want))?;
        }
        writeln!(console, "ok")?;
        return Ok(());
    }

    writeln!(console, "{RULE}")?;
    writeln!(console, "File \"{module}\", line {}, in {unit}", example.line)?;
    write!(console, "Failed example:\n{}", indented(&example.source))?;
    if example.want.is_empty() {
        writeln!(console, "Expected nothing")?;
    } else {
        write!(console, "Expected:\n{}", indented(&example.want))?;
    }
    if got.is_empty() {
        writeln!(console, "Got nothing")?;
    } else {
        write!(console, "Got:\n{}", indented(got))?;
    }
    Ok(())
}
