//! Command-line parsing for `runtests`.
//!
//! Parsing never fails the run: anything clap rejects produces a diagnostic
//! and the default configuration.

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::RunConfig;

/// Printed when the arguments cannot be parsed.
pub const PARSE_DIAGNOSTIC: &str = "Could not parse arguments";

/// Run the census regression suite.
#[derive(Debug, Parser)]
#[command(name = "runtests", args_override_self = true)]
pub struct Cli {
    /// Print every example as it runs, and details of each failure
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the extra census passes and the slow visual checks
    #[arg(short, long)]
    pub quick: bool,

    /// Keep visual test windows open until closed
    #[arg(short, long)]
    pub windows: bool,

    /// Skip checks that need modern OpenGL
    #[arg(short = 's', long = "skip-modern-opengl")]
    pub skip_modern_opengl: bool,

    /// Accepted for compatibility; has no effect
    #[arg(short, long, hide = true)]
    pub ignore: bool,

    #[arg(hide = true)]
    pub rest: Vec<String>,
}

impl Cli {
    pub fn config(&self) -> RunConfig {
        RunConfig {
            verbose: self.verbose,
            quick: self.quick,
            windows: self.windows,
            modern_gl: !self.skip_modern_opengl,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run with `config`, after printing `diagnostic` if there is one.
    Run {
        config: RunConfig,
        diagnostic: Option<String>,
    },
    /// Print help text and exit.
    Help(String),
}

/// Parse a full argument list, program name first.
pub fn parse_args<I, S>(args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    // macOS adds a process serial number when launched from the Finder.
    let args: Vec<String> = args
        .into_iter()
        .map(Into::into)
        .enumerate()
        .filter(|(i, a)| *i == 0 || !a.starts_with("-psn_"))
        .map(|(_, a)| a)
        .collect();

    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Run {
            config: cli.config(),
            diagnostic: None,
        },
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Help(e.to_string())
        }
        Err(e) => {
            tracing::debug!(error = %e, "argument parsing failed");
            Invocation::Run {
                config: RunConfig::default(),
                diagnostic: Some(PARSE_DIAGNOSTIC.to_string()),
            }
        }
    }
}
