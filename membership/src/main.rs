#![warn(clippy::unwrap_used, clippy::expect_used)]

mod calldata;
mod commands;
mod config;
mod errors;
mod logging;
mod util;

use std::process::ExitCode;

use tracing::error;

use crate::{
    commands::Pipeline,
    config::{Config, MembershipCommand},
    errors::{AppError, Result},
};

fn run(config: Config) -> Result<()> {
    let command = config.command.ok_or(AppError::NoCommand)?;
    let pipeline = Pipeline::from_config(&config)?;

    match command {
        MembershipCommand::HashLeaves => {
            pipeline.hash_leaves()?;
        }
        MembershipCommand::Prove => {
            pipeline.prove()?;
        }
        MembershipCommand::ProveIncremental => {
            pipeline.prove_incremental()?;
        }
        MembershipCommand::Verify => {
            pipeline.verify()?;
            println!("Proof accepted!");
        }
        MembershipCommand::Calldata => {
            pipeline.calldata()?;
        }
    }

    Ok(())
}

/// The error followed by each of its causes, one per line
fn report(err: &dyn std::error::Error) -> String {
    let mut output = format!("{err}");
    let mut error = err;
    while let Some(source) = error.source() {
        output = format!("{output}\n  Caused by: {source}");
        error = source;
    }
    output
}

fn main() -> ExitCode {
    let config = match Config::new() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", report(&err));
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init(config.log_level, config.log_format) {
        eprintln!("{}", report(&err));
        return ExitCode::FAILURE;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", report(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_includes_every_cause() {
        let err = AppError::from(accumulator::Error::InvalidConfig("arity 1".into()));

        assert_eq!(
            report(&err),
            "accumulator error\n  Caused by: invalid tree configuration: arity 1"
        );
    }
}
