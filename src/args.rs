// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Classify raw command-line tokens into an occec invocation.
// Author: Lukas Bower

use thiserror::Error;

use crate::PRIMARY_ARTIFACT;

/// Prefix that marks a token as a flag rather than the source path.
pub const FLAG_PREFIX: char = '-';
/// Output flag the tool reserves for itself.
pub const RESERVED_OUTPUT_FLAG: &str = "-o";
/// Sentinel that keeps build artifacts after a successful run.
pub const NO_CLEAR_FLAG: &str = "--no-clear";

/// Command-line combinations occec refuses to run with.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsageError {
    /// No source path was supplied.
    #[error("No file provided... please retry with one.")]
    NoFile,
    /// More than one source path was supplied.
    #[error("Passing more than one file is not supported! (got '{first}' and '{second}')")]
    MultipleFiles {
        /// Source path accepted first.
        first: String,
        /// Offending additional path.
        second: String,
    },
    /// The reserved output flag was supplied.
    #[error(
        "Avoid using the {} flag, output is always named {}",
        RESERVED_OUTPUT_FLAG,
        PRIMARY_ARTIFACT
    )]
    ReservedFlag,
    /// A token is not valid UTF-8.
    #[error("Arguments must be valid UTF-8 (got '{token}')")]
    NotUnicode {
        /// Lossy rendering of the offending token.
        token: String,
    },
}

/// Parameters of one orchestrator run, immutable once classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    source: String,
    suppress_cleanup: bool,
    extra_args: Vec<String>,
}

impl Invocation {
    /// Classify raw tokens, excluding the program name.
    pub fn classify<I, S>(tokens: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut source: Option<String> = None;
        let mut suppress_cleanup = false;
        let mut extra_args = Vec::new();

        for token in tokens {
            let token = token.into();
            if !token.starts_with(FLAG_PREFIX) {
                if let Some(first) = &source {
                    return Err(UsageError::MultipleFiles {
                        first: first.clone(),
                        second: token,
                    });
                }
                source = Some(token);
            } else if token == RESERVED_OUTPUT_FLAG {
                return Err(UsageError::ReservedFlag);
            } else if token == NO_CLEAR_FLAG {
                suppress_cleanup = true;
            } else {
                extra_args.push(token);
            }
        }

        match source {
            Some(source) if !source.is_empty() => Ok(Invocation {
                source,
                suppress_cleanup,
                extra_args,
            }),
            _ => Err(UsageError::NoFile),
        }
    }

    /// Source file to compile.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when `--no-clear` was given.
    pub fn suppress_cleanup(&self) -> bool {
        self.suppress_cleanup
    }

    /// Flags forwarded verbatim to the compiler, in command-line order.
    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }
}
