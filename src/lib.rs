// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Library root for the occec compile, execute and clear orchestrator.
// Author: Lukas Bower

//! Single-file build-and-run orchestrator for C and OCaml sources.
//!
//! A run classifies the command line, resolves a toolchain from the source
//! suffix, compiles to [`PRIMARY_ARTIFACT`], executes it and removes the
//! build outputs. A SIGINT at any point terminates the process with status
//! 130 after removing the artifact if it is already live.

/// Raw token classification.
pub mod args;
/// Artifact and byproduct removal.
pub mod clean;
/// clap capture of the command line.
pub mod cli;
/// Argument vector construction.
pub mod command;
/// Environment configuration.
pub mod config;
/// Error taxonomy and exit statuses.
pub mod error;
/// SIGINT handling.
pub mod interrupt;
/// Phase tracking and the pipeline driver.
pub mod pipeline;
/// Child process execution.
pub mod process;
/// Colored operator output.
pub mod report;
/// Toolchain registry.
pub mod toolchain;

pub use args::Invocation;
pub use config::Config;
pub use error::OccecError;
pub use pipeline::{Phase, PipelineState, RunSummary};
pub use toolchain::{Toolchain, ToolchainDescriptor};

/// Fixed name of the build output, created in the working directory.
pub const PRIMARY_ARTIFACT: &str = "compiled.code";
