//! Run a planner scenario on the host.
//!
//! Usage:
//!   cargo run -p adaptive_long_sim --bin plannerd_sim -- <SCENARIO> [OPTIONS]
//!
//! Options:
//!   -o, --output <FILE>   Write plan messages as JSON lines
//!   --realtime            Pace cycles at wall-clock rate
//!   --factor <F>          Pace cycles at F times wall-clock rate
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::{self, ExitCode};

use adaptive_long_sim::{run_scenario, JsonLinesSink, NullSink, Scenario, SimError, TimeMode};
use tracing_subscriber::EnvFilter;

struct Args {
    scenario: PathBuf,
    output: Option<PathBuf>,
    time_mode: TimeMode,
}

fn parse_args() -> Args {
    let raw: Vec<String> = env::args().collect();
    let mut scenario = None;
    let mut output = None;
    let mut time_mode = TimeMode::FreeRunning;

    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                output = Some(PathBuf::from(required(&raw, i, "output")));
            }
            "--realtime" => time_mode = TimeMode::REAL_TIME,
            "--factor" => {
                i += 1;
                let factor = required(&raw, i, "factor").parse().unwrap_or_else(|_| {
                    eprintln!("Error: invalid value for --factor");
                    process::exit(1);
                });
                time_mode = TimeMode::Scaled { factor };
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
            path => scenario = Some(PathBuf::from(path)),
        }
        i += 1;
    }

    let Some(scenario) = scenario else {
        eprintln!("Error: a scenario file is required");
        print_usage();
        process::exit(1);
    };

    Args {
        scenario,
        output,
        time_mode,
    }
}

fn required<'a>(raw: &'a [String], i: usize, name: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: --{name} requires a value");
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: plannerd_sim <SCENARIO> [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -o, --output <FILE>   Write plan messages as JSON lines\n\
         \x20 --realtime            Pace cycles at wall-clock rate\n\
         \x20 --factor <F>          Pace cycles at F times wall-clock rate\n\
         \x20 -h, --help            Show this help"
    );
}

async fn run(args: Args) -> Result<(), SimError> {
    let scenario = Scenario::load(&args.scenario)?;
    tracing::info!(
        scenario = %scenario.name,
        cycles = scenario.cycles(),
        "loaded scenario"
    );

    let summary = match &args.output {
        Some(path) => {
            let mut sink = JsonLinesSink::new(BufWriter::new(File::create(path)?));
            let summary = run_scenario(&scenario, args.time_mode, &mut sink).await?;
            tracing::info!(path = %path.display(), messages = sink.written(), "plan written");
            sink.into_inner()?;
            summary
        }
        None => run_scenario(&scenario, args.time_mode, &mut NullSink).await?,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(parse_args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
