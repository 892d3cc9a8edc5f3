// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: SIGINT handling that removes a live artifact and exits with 130.
// Author: Lukas Bower

//! SIGINT handler.
//!
//! The handler can fire while the orchestrator is anywhere, including inside
//! a blocking wait on a child. It therefore limits itself to `write(2)` on
//! the stdout descriptor, `unlink(2)` of a path encoded ahead of time, and
//! `_exit(2)`. It allocates nothing, takes no locks and never touches the
//! buffered `std::io` handles or the logger.

use std::ffi::{CStr, CString, NulError};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::error::EXIT_INTERRUPTED;
use crate::pipeline::PipelineState;

/// Notice written straight to fd 1 when the interrupt arrives.
pub const INTERRUPT_NOTICE: &[u8] = b"\n[INTERRUPTED] occec received SIGINT\n";

/// How long the orchestrator waits for the handler after a child died of
/// SIGINT before treating the step as an ordinary failure.
pub const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

/// The handler could not be registered.
#[derive(Debug, Error)]
pub enum InterruptError {
    /// The artifact path cannot be passed to `unlink(2)`.
    #[error("artifact path contains a NUL byte: {0}")]
    Path(#[from] NulError),
    /// The signal handler could not be installed.
    #[error("failed to install SIGINT handler: {0}")]
    Install(#[from] ctrlc::Error),
}

/// Register the SIGINT handler for this process.
///
/// `state` is shared with the orchestrator thread, which is its only writer.
/// `artifact` is the primary artifact to unlink once it is known to exist.
pub fn install(state: Arc<PipelineState>, artifact: &Path) -> Result<(), InterruptError> {
    let artifact = CString::new(artifact.as_os_str().as_bytes())?;
    debug!("SIGINT handler guards {:?}", artifact);
    ctrlc::set_handler(move || {
        reap(&state, &artifact);
        // SAFETY: _exit is async-signal-safe and terminates without running
        // destructors or flushing buffered streams.
        unsafe { libc::_exit(EXIT_INTERRUPTED) }
    })?;
    Ok(())
}

/// Write the notice and unlink `artifact` if the current phase owns it.
/// Returns whether the artifact was removed.
///
/// The artifact is left alone while building: the compiler may still hold it
/// open or may not have created it yet.
pub fn reap(state: &PipelineState, artifact: &CStr) -> bool {
    write_notice();
    if !state.phase().removes_artifact() {
        return false;
    }
    // SAFETY: `artifact` is a valid NUL-terminated path that outlives the call.
    unsafe { libc::unlink(artifact.as_ptr()) == 0 }
}

/// Give a pending SIGINT handler time to terminate the process.
pub fn settle() {
    debug!("child ended by SIGINT, waiting {INTERRUPT_GRACE:?} for the handler");
    thread::sleep(INTERRUPT_GRACE);
}

fn write_notice() {
    // SAFETY: writes a static buffer to a descriptor owned by this process;
    // a short or failed write is ignored.
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            INTERRUPT_NOTICE.as_ptr().cast(),
            INTERRUPT_NOTICE.len(),
        );
    }
}
