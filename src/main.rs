// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: CLI entry point for the occec orchestrator.
// Author: Lukas Bower
#![forbid(unsafe_code)]

//! Entry point for the occec binary.

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{info, warn, LevelFilter};
use occec::cli::Cli;
use occec::config::ENV_LOG;
use occec::error::{EXIT_FAILURE, EXIT_SUCCESS};
use occec::{interrupt, pipeline, report};
use occec::{Config, Invocation, OccecError, PipelineState, RunSummary, PRIMARY_ARTIFACT};

fn init_logging() {
    let filter_env = if env::var_os(ENV_LOG).is_some() {
        ENV_LOG
    } else {
        env_logger::DEFAULT_FILTER_ENV
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().filter_or(filter_env, LevelFilter::Warn.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn main_entry(cli: Cli) -> Result<RunSummary> {
    let state = Arc::new(PipelineState::new());
    let artifact = env::current_dir()
        .context("failed to resolve the working directory")?
        .join(PRIMARY_ARTIFACT);
    interrupt::install(Arc::clone(&state), &artifact).map_err(OccecError::from)?;

    let config = Config::from_env()?;
    let tokens = cli.into_tokens().map_err(OccecError::from)?;
    let invocation = Invocation::classify(tokens).map_err(OccecError::from)?;
    let summary = pipeline::execute(&invocation, &config, &state)?;
    Ok(summary)
}

fn report_failure(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<OccecError>() {
        Some(occec) => {
            report::error(occec);
            if occec.wants_usage() {
                report::usage(Cli::usage());
            }
            occec.exit_code()
        }
        None => {
            report::error(format_args!("{err:#}"));
            EXIT_FAILURE
        }
    }
}

fn log_summary(summary: &RunSummary) {
    match &summary.cleanup {
        Some(cleanup) if cleanup.is_clean() => info!(
            "{} run finished, {} file(s) removed",
            summary.toolchain,
            cleanup.removed.len()
        ),
        Some(cleanup) => warn!(
            "{} run finished, {} file(s) removed, {} left behind",
            summary.toolchain,
            cleanup.removed.len(),
            cleanup.failures.len()
        ),
        None => info!("{} run finished, artifacts kept", summary.toolchain),
    }
}

fn main() {
    init_logging();
    let cli = match Cli::try_parse_args(env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            report::error(err.kind());
            report::usage(Cli::usage());
            process::exit(EXIT_FAILURE);
        }
    };
    let status = match main_entry(cli) {
        Ok(summary) => {
            log_summary(&summary);
            report::success();
            EXIT_SUCCESS
        }
        Err(err) => report_failure(&err),
    };
    process::exit(status);
}
