// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Pipeline phase tracking and the compile, execute, clean sequence.
// Author: Lukas Bower

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};

use log::{debug, info};

use crate::args::Invocation;
use crate::clean::{self, CleanReport};
use crate::command::CommandLine;
use crate::config::Config;
use crate::error::OccecError;
use crate::interrupt;
use crate::process::{self, ProcessFailure, ProcessResult};
use crate::report;
use crate::toolchain::Toolchain;
use crate::PRIMARY_ARTIFACT;

/// Pipeline phases in the only order they can occur.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Classifying the command line; nothing exists on disk yet.
    ParsingArgs = 0,
    /// The compiler is producing the artifact.
    Building = 1,
    /// The artifact is running.
    Executing = 2,
    /// The artifact and byproducts are being removed.
    Cleaning = 3,
    /// Every phase finished.
    Done = 4,
}

impl Phase {
    fn from_u8(value: u8) -> Phase {
        match value {
            x if x == Phase::Building as u8 => Phase::Building,
            x if x == Phase::Executing as u8 => Phase::Executing,
            x if x == Phase::Cleaning as u8 => Phase::Cleaning,
            x if x == Phase::Done as u8 => Phase::Done,
            _ => Phase::ParsingArgs,
        }
    }

    /// Whether an interrupt in this phase must delete the primary artifact.
    /// Only true once the artifact exists and the compiler has let go of it.
    pub fn removes_artifact(self) -> bool {
        matches!(self, Phase::Executing | Phase::Cleaning)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::ParsingArgs => "parsing-args",
            Phase::Building => "building",
            Phase::Executing => "executing",
            Phase::Cleaning => "cleaning",
            Phase::Done => "done",
        };
        f.write_str(label)
    }
}

/// Current phase, shared between the orchestrator thread (sole writer) and
/// the interrupt handler (reader). Lock-free so the handler can read it at
/// any point.
#[derive(Debug)]
pub struct PipelineState {
    phase: AtomicU8,
}

impl PipelineState {
    /// State at process start, in [`Phase::ParsingArgs`].
    pub fn new() -> Self {
        PipelineState {
            phase: AtomicU8::new(Phase::ParsingArgs as u8),
        }
    }

    /// Phase most recently entered.
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Record that `next` is about to begin. Must be called before the phase
    /// starts, never after, and only moving forward.
    pub fn enter(&self, next: Phase) {
        let current = self.phase();
        debug_assert!(next > current, "phase {next} cannot follow {current}");
        self.phase.store(next as u8, Ordering::SeqCst);
        debug!("phase {current} -> {next}");
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a successful run did.
#[derive(Debug)]
pub struct RunSummary {
    /// Toolchain that built the source.
    pub toolchain: Toolchain,
    /// Cleaning outcome, or `None` when `--no-clear` was given.
    pub cleanup: Option<CleanReport>,
}

/// Resolve, compile, execute and (unless suppressed) clean.
///
/// `state` is advanced immediately before each phase begins. A failed
/// compile or execute stops the pipeline; cleanup failures are reported and
/// never fail the run.
pub fn execute(
    invocation: &Invocation,
    config: &Config,
    state: &PipelineState,
) -> Result<RunSummary, OccecError> {
    let toolchain = Toolchain::resolve(invocation.source())?;
    let descriptor = config.descriptor(toolchain);
    let compile = descriptor.build_command(invocation);
    let run = descriptor.run_command();
    info!(
        "{} toolchain for {}: {}",
        descriptor.kind(),
        invocation.source(),
        compile
    );

    report::stage(format_args!(
        "Compiling {} into {}",
        invocation.source(),
        PRIMARY_ARTIFACT
    ));
    step(state, Phase::Building, &compile).map_err(OccecError::CompileFailure)?;

    report::stage(format_args!("Executing {PRIMARY_ARTIFACT}"));
    step(state, Phase::Executing, &run).map_err(OccecError::ExecuteFailure)?;

    let cleanup = if invocation.suppress_cleanup() {
        info!("--no-clear given, keeping {PRIMARY_ARTIFACT}");
        None
    } else {
        report::stage(format_args!("Cleaning {PRIMARY_ARTIFACT}"));
        state.enter(Phase::Cleaning);
        let cleaned = clean::clean(&descriptor, invocation.source(), Path::new(PRIMARY_ARTIFACT));
        for failure in &cleaned.failures {
            report::error(failure);
        }
        Some(cleaned)
    };

    state.enter(Phase::Done);
    Ok(RunSummary { toolchain, cleanup })
}

fn step(
    state: &PipelineState,
    phase: Phase,
    cmd: &CommandLine,
) -> Result<ProcessResult, ProcessFailure> {
    state.enter(phase);
    let result = process::run_checked(cmd);
    if let Err(ProcessFailure::Status(status)) = &result {
        if status.ended_by(libc::SIGINT) {
            interrupt::settle();
        }
    }
    result
}
