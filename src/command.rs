// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Build compile and execute argument vectors without a shell.
// Author: Lukas Bower

use std::fmt;

use crate::args::Invocation;
use crate::toolchain::ToolchainDescriptor;
use crate::PRIMARY_ARTIFACT;

/// Output flag placed on every compile line.
pub const OUTPUT_FLAG: &str = "-o";

/// An owned, append-only argument vector. The first element is the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
}

impl CommandLine {
    /// Start a command line with `program` as argv[0].
    pub fn new(program: impl Into<String>) -> Self {
        CommandLine {
            argv: vec![program.into()],
        }
    }

    /// Append one argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.argv.push(arg.into());
        self
    }

    /// Append arguments in order.
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to spawn.
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program.
    pub fn arguments(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The full vector, program included.
    pub fn as_slice(&self) -> &[String] {
        &self.argv
    }
}

/// Debug rendering only; never handed to a shell.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{arg:?}")?;
        }
        Ok(())
    }
}

impl ToolchainDescriptor {
    /// `[compiler, source, -o, artifact] ++ base flags ++ user flags`.
    ///
    /// Base flags precede user flags so the user can override them.
    pub fn build_command(&self, invocation: &Invocation) -> CommandLine {
        let mut cmd = CommandLine::new(self.compiler());
        cmd.arg(invocation.source())
            .arg(OUTPUT_FLAG)
            .arg(PRIMARY_ARTIFACT)
            .args(self.base_flags().iter().copied())
            .args(invocation.extra_args().iter().cloned());
        cmd
    }

    /// Command that executes the primary artifact.
    pub fn run_command(&self) -> CommandLine {
        match self.runner() {
            Some(runner) => {
                let mut cmd = CommandLine::new(runner);
                cmd.arg(PRIMARY_ARTIFACT);
                cmd
            }
            // Path-qualified so spawning does not search PATH.
            None => CommandLine::new(format!("./{PRIMARY_ARTIFACT}")),
        }
    }
}
