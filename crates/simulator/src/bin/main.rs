//! Pipesim CLI
//!
//! Run a producer/consumer pipeline simulation and render its timeline.
//!
//! # Example
//!
//! ```bash
//! # Default timings, 100 consumer-process slots, diagram in output.html
//! pipesim
//!
//! # Tiny queue, slow consumer, no diagram, every event logged
//! pipesim -L 1 -W 20 -O --verbose
//! ```

use clap::Parser;
use pipesim_simulator::{ProdConConfig, Simulator};
use pipesim_trace::{write_html, write_json, TraceData};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Pipesim
///
/// Simulates a producer and a consumer sharing a bounded queue on two
/// simulated threads. Durations are in ticks.
#[derive(Parser, Debug)]
#[command(name = "pipesim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Producer start
    #[arg(short = 's', long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..))]
    producer_start: u32,

    /// Producer notify
    #[arg(short = 'n', long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
    producer_notify: u32,

    /// Producer process
    #[arg(short = 'w', long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    producer_process: u32,

    /// Consumer start
    #[arg(short = 'S', long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..))]
    consumer_start: u32,

    /// Consumer notify
    #[arg(short = 'N', long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
    consumer_notify: u32,

    /// Consumer process
    #[arg(short = 'W', long, default_value = "13", value_parser = clap::value_parser!(u32).range(1..))]
    consumer_process: u32,

    /// Simulation length, in consumer-process units
    #[arg(short = 'T', long, short_alias = 't', default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    slots: u32,

    /// Queue length
    #[arg(short = 'L', long = "queue", short_alias = 'l', default_value = "32", value_parser = clap::value_parser!(u32).range(1..))]
    queue: u32,

    /// HTML output file
    #[arg(short = 'o', long, default_value = "output.html")]
    output: PathBuf,

    /// Skip the HTML output file
    #[arg(short = 'O', long)]
    no_output: bool,

    /// Also write the trace as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log every work start and end
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> ProdConConfig {
        ProdConConfig::new()
            .with_producer(
                self.producer_start as f64,
                self.producer_notify as f64,
                self.producer_process as f64,
            )
            .with_consumer(
                self.consumer_start as f64,
                self.consumer_notify as f64,
                self.consumer_process as f64,
            )
            .with_queue_capacity(self.queue)
            .with_horizon_slots(self.slots)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let default_filter = if args.verbose {
        "warn,pipesim_simulator=info,pipesim_simulation=debug"
    } else {
        "warn,pipesim_simulator=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = args.config();
    println!("{config}");

    let mut simulator = match Simulator::new(config) {
        Ok(simulator) => simulator,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let report = simulator.run();
    println!("{report}");

    let trace = TraceData::capture(simulator.scheduler());

    if !args.no_output {
        if let Err(e) = write_html(&args.output, &trace) {
            error!(error = %e, "Failed to write trace diagram");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = &args.json {
        if let Err(e) = write_json(path, &trace) {
            error!(error = %e, "Failed to write JSON trace");
            return ExitCode::FAILURE;
        }
    }

    info!(events = report.events_processed, "Done");
    ExitCode::SUCCESS
}
