// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Remove the primary artifact and toolchain byproducts after a run.
// Author: Lukas Bower

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::toolchain::{ToolchainDescriptor, ToolchainError};

/// A single file that could not be cleaned. Never fatal.
#[derive(Debug, Error)]
pub enum CleanupFailure {
    /// Removing an existing path failed.
    #[error("Failed to clean {} after execution: {source}", .path.display())]
    Remove {
        /// Path that was not removed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The byproduct name could not be derived from the source path.
    #[error(transparent)]
    Underivable(#[from] ToolchainError),
}

/// Outcome of one cleaning pass.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Files that could not be deleted, each reported on its own.
    pub failures: Vec<CleanupFailure>,
}

impl CleanReport {
    /// True when every file was removed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn remove(&mut self, path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("removed {}", path.display());
                self.removed.push(path.to_path_buf());
            }
            Err(source) => {
                warn!("could not remove {}: {source}", path.display());
                self.failures.push(CleanupFailure::Remove {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

/// Remove `artifact`, then every byproduct `descriptor` derives from `source`.
pub fn clean(descriptor: &ToolchainDescriptor, source: &str, artifact: &Path) -> CleanReport {
    let mut report = CleanReport::default();
    report.remove(artifact);
    for byproduct in descriptor.byproducts(source) {
        match byproduct {
            Ok(path) => report.remove(&path),
            Err(err) => {
                warn!("{err}");
                report.failures.push(err.into());
            }
        }
    }
    report
}
