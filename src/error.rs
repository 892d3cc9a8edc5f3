// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Error taxonomy and exit-status mapping for the occec pipeline.
// Author: Lukas Bower

use thiserror::Error;

use crate::args::UsageError;
use crate::interrupt::InterruptError;
use crate::process::ProcessFailure;
use crate::toolchain::ToolchainError;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for every fatal error reported by the orchestrator.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status reserved for runs terminated by a user interrupt.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Fatal errors surfaced by the orchestrator.
#[derive(Debug, Error)]
pub enum OccecError {
    /// The command line could not be classified.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// No toolchain handles the given source file.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
    /// The compile step did not succeed.
    #[error("Compilation failed: {0}")]
    CompileFailure(ProcessFailure),
    /// The compiled program did not succeed.
    #[error("Failed to execute the compiled code: {0}")]
    ExecuteFailure(ProcessFailure),
    /// The interrupt handler could not be installed.
    #[error(transparent)]
    Interrupt(#[from] InterruptError),
}

impl OccecError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            OccecError::Usage(_)
            | OccecError::Toolchain(_)
            | OccecError::CompileFailure(_)
            | OccecError::ExecuteFailure(_)
            | OccecError::Interrupt(_) => EXIT_FAILURE,
        }
    }

    /// Whether the operator should also be shown the usage line.
    pub fn wants_usage(&self) -> bool {
        matches!(self, OccecError::Usage(_))
    }
}
