// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Environment overrides for toolchain executables and logging.
// Author: Lukas Bower

use std::env;

use anyhow::{anyhow, Result};

use crate::toolchain::{Toolchain, ToolchainDescriptor};

/// Replaces the C compiler executable.
pub const ENV_CLANG: &str = "OCCEC_CLANG";
/// Replaces the OCaml bytecode compiler executable.
pub const ENV_OCAMLC: &str = "OCCEC_OCAMLC";
/// Replaces the OCaml bytecode runner executable.
pub const ENV_OCAMLRUN: &str = "OCCEC_OCAMLRUN";
/// Log filter, read before `RUST_LOG`.
pub const ENV_LOG: &str = "OCCEC_LOG";

/// Resolved configuration. Only executable names are configurable; flags,
/// byproducts and the artifact name are fixed per toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    clang: Option<String>,
    ocamlc: Option<String>,
    ocamlrun: Option<String>,
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        if let Some(clang) = env_override(ENV_CLANG)? {
            config = config.with_clang(clang);
        }
        if let Some(ocamlc) = env_override(ENV_OCAMLC)? {
            config = config.with_ocamlc(ocamlc);
        }
        if let Some(ocamlrun) = env_override(ENV_OCAMLRUN)? {
            config = config.with_ocamlrun(ocamlrun);
        }
        Ok(config)
    }

    /// Replace the C compiler.
    pub fn with_clang(mut self, path: impl Into<String>) -> Self {
        self.clang = Some(path.into());
        self
    }

    /// Replace the OCaml bytecode compiler.
    pub fn with_ocamlc(mut self, path: impl Into<String>) -> Self {
        self.ocamlc = Some(path.into());
        self
    }

    /// Replace the OCaml bytecode runner.
    pub fn with_ocamlrun(mut self, path: impl Into<String>) -> Self {
        self.ocamlrun = Some(path.into());
        self
    }

    /// Descriptor for `toolchain` with any configured executables applied.
    pub fn descriptor(&self, toolchain: Toolchain) -> ToolchainDescriptor {
        let descriptor = toolchain.descriptor();
        match toolchain {
            Toolchain::NativeCompiled => match &self.clang {
                Some(clang) => descriptor.with_compiler(clang.as_str()),
                None => descriptor,
            },
            Toolchain::BytecodeInterpreted => {
                let descriptor = match &self.ocamlc {
                    Some(ocamlc) => descriptor.with_compiler(ocamlc.as_str()),
                    None => descriptor,
                };
                match &self.ocamlrun {
                    Some(ocamlrun) => descriptor.with_runner(ocamlrun.as_str()),
                    None => descriptor,
                }
            }
        }
    }
}

fn env_override(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_owned()))
            }
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(anyhow!("failed to read {key}: {err}")),
    }
}
