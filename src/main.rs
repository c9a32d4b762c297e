use std::{env, process::ExitCode};

use flagcheck::{
    config::{ConfigError, ExecutorChoice, HarnessConfig},
    executor::{Executor, SoftwareExecutor},
    harness::Harness,
    native::NativeExecutor,
    suites::standard_registry,
};
use tracing::error;

fn main() -> ExitCode {
    let config = match HarnessConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested(usage)) => {
            println!("{}", usage);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("{}", flagcheck::config::USAGE);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let registry = match standard_registry() {
        Ok(registry) => registry,
        Err(err) => {
            error!("registration failed: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let executor: &(dyn Executor + Sync) = match config.executor {
        ExecutorChoice::Native => &NativeExecutor,
        ExecutorChoice::Software => &SoftwareExecutor,
    };

    let mut harness = Harness::new(&registry);
    if let Some(op) = config.filter {
        harness = harness.with_filter(op);
    }
    let summary = if config.threads > 1 {
        harness.run_all_parallel(executor, config.threads)
    } else {
        harness.run_all(executor)
    };

    for failure in &summary.failures {
        println!("FAIL {}", failure);
    }
    println!("{}: {}", executor.name(), summary);

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
