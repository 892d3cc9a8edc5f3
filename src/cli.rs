// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Capture raw occec command-line tokens and render usage text.
// Author: Lukas Bower

use std::ffi::OsString;

use clap::{CommandFactory, Parser};

use crate::args::UsageError;

/// Top-level command line. Every token is kept verbatim and classified by
/// [`crate::args::Invocation::classify`]; compiler flags such as `-h` or `-V`
/// must reach the compiler, so clap's own help and version flags are off.
#[derive(Debug, Parser)]
#[command(
    name = "occec",
    author = "Lukas Bower",
    version,
    about = "Compile, execute and clear a single C or OCaml source file",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Source file plus compiler flags; `--no-clear` keeps build artifacts.
    #[arg(
        value_name = "FILE|FLAG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    pub tokens: Vec<OsString>,
}

impl Cli {
    /// Parse a full argv, program name first.
    ///
    /// An end-of-options marker is placed ahead of the user tokens so clap
    /// treats all of them as values, including a leading `--`.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from("occec"));
        let argv = [program, OsString::from("--")].into_iter().chain(args);
        Cli::try_parse_from(argv)
    }

    /// Tokens as UTF-8 strings, in command-line order.
    pub fn into_tokens(self) -> Result<Vec<String>, UsageError> {
        self.tokens
            .into_iter()
            .map(|token| {
                token.into_string().map_err(|raw| UsageError::NotUnicode {
                    token: raw.to_string_lossy().into_owned(),
                })
            })
            .collect()
    }

    /// One-line usage string shown after usage errors.
    pub fn usage() -> String {
        Cli::command().render_usage().to_string()
    }
}
