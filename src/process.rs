// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Spawn a child from an argument vector and classify how it ended.
// Author: Lukas Bower

use std::fmt;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;
use thiserror::Error;

use crate::command::CommandLine;

/// How a child process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Normal exit with the given status code.
    ExitedWithCode(i32),
    /// Terminated by the given signal number.
    KilledBySignal(i32),
}

/// Result of one spawn, consumed immediately by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    outcome: Outcome,
}

impl ProcessResult {
    /// A child that exited with `code`.
    pub fn exited(code: i32) -> Self {
        ProcessResult {
            outcome: Outcome::ExitedWithCode(code),
        }
    }

    /// A child terminated by `signal`.
    pub fn killed(signal: i32) -> Self {
        ProcessResult {
            outcome: Outcome::KilledBySignal(signal),
        }
    }

    /// How the child ended.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True only for a clean exit with code 0.
    pub fn success(&self) -> bool {
        self.outcome == Outcome::ExitedWithCode(0)
    }

    /// True when the child was terminated by `signal`.
    pub fn killed_by(&self, signal: i32) -> bool {
        self.outcome == Outcome::KilledBySignal(signal)
    }

    /// True when the child died of `signal` or exited with the shell
    /// convention `128 + signal`.
    pub fn ended_by(&self, signal: i32) -> bool {
        self.killed_by(signal) || self.outcome == Outcome::ExitedWithCode(128 + signal)
    }
}

impl From<ExitStatus> for ProcessResult {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => ProcessResult::exited(code),
            (None, Some(signal)) => ProcessResult::killed(signal),
            // wait(2) reports either an exit code or a signal.
            (None, None) => ProcessResult::exited(-1),
        }
    }
}

impl fmt::Display for ProcessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::ExitedWithCode(code) => write!(f, "exited with code {code}"),
            Outcome::KilledBySignal(signal) => write!(f, "terminated by signal {signal}"),
        }
    }
}

/// The operating system refused to start or reap a child.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// `program` could not be started.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program that was requested.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Waiting on the child failed.
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        /// Program that was running.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Why a pipeline step did not succeed.
#[derive(Debug, Error)]
pub enum ProcessFailure {
    /// The child ran and ended unsuccessfully.
    #[error("{0}")]
    Status(ProcessResult),
    /// The child never ran to completion.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Spawn `cmd` with inherited standard streams and block until it ends.
///
/// There is no timeout: a child that never terminates blocks the caller.
pub fn run(cmd: &CommandLine) -> Result<ProcessResult, ProcessError> {
    debug!("spawn {cmd}");
    let mut child = Command::new(cmd.program())
        .args(cmd.arguments())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: cmd.program().to_owned(),
            source,
        })?;
    let status = child.wait().map_err(|source| ProcessError::Wait {
        program: cmd.program().to_owned(),
        source,
    })?;
    let result = ProcessResult::from(status);
    debug!("{} {result}", cmd.program());
    Ok(result)
}

/// Run `cmd` and fold a non-successful outcome into a [`ProcessFailure`].
pub fn run_checked(cmd: &CommandLine) -> Result<ProcessResult, ProcessFailure> {
    let result = run(cmd)?;
    if result.success() {
        Ok(result)
    } else {
        Err(ProcessFailure::Status(result))
    }
}
