//! `runtests`: run the census regression suite and exit with the failure count.

use std::io::{self, Write};
use std::process::ExitCode;

use manifold_kernel::CensusKernel;
use regress::cli::{parse_args, Invocation};
use regress::{Capabilities, Orchestrator, RegressError, RunConfig, RunContext, RunReport, FATAL_EXIT_CODE};
use tracing_subscriber::EnvFilter;

fn run(config: RunConfig, caps: &Capabilities) -> Result<RunReport, RegressError> {
    let engine = CensusKernel::new();
    let mut orchestrator = Orchestrator::standard(caps)?;

    let stdout = io::stdout();
    let mut console = stdout.lock();
    let mut ctx = RunContext::new(&engine, &mut console, config);
    let report = orchestrator.run(&mut ctx)?;
    write!(ctx.console, "\n{}", report.to_text())?;
    ctx.console.flush()?;
    Ok(report)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match parse_args(std::env::args()) {
        Invocation::Help(text) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Invocation::Run { config, diagnostic } => {
            if let Some(message) = diagnostic {
                println!("{message}");
            }
            config
        }
    };

    let caps = Capabilities::detect();
    match run(config, &caps) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            eprintln!("runtests: {e}");
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}
