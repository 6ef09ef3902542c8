//! Build `census.sqlite` from the engine's orientable cusped census.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use manifold_kernel::CensusKernel;
use tracing_subscriber::EnvFilter;

/// Serialize the census into a fresh SQLite database.
#[derive(Debug, Parser)]
#[command(name = "make-census-db")]
struct Args {
    /// Output database file; must not exist yet.
    #[arg(default_value = "census.sqlite")]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let engine = CensusKernel::new();

    let mut conn = match census_db::open_census(&args.output) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("{e}!");
            return ExitCode::FAILURE;
        }
    };

    match census_db::build_census(&mut conn, &engine) {
        Ok(summary) => {
            for failed in &summary.failed {
                match &failed.query {
                    Some(query) => println!("{}: {}\n  {}", failed.name, failed.error, query),
                    None => println!("{}: {}", failed.name, failed.error),
                }
            }
            println!(
                "{} manifolds written to {}",
                summary.inserted,
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("census build failed: {e}");
            ExitCode::FAILURE
        }
    }
}
