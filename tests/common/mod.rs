// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Shared sandbox and fake-toolchain helpers for occec integration tests.
// Author: Lukas Bower
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tempfile::{tempdir, TempDir};

pub const ARTIFACT: &str = "compiled.code";

/// Fake C compiler: records its argv in `compile.args` and writes `$3`
/// (the `-o` target) as a shell script whose body is `program`.
pub fn fake_compiler(program: &str) -> String {
    format!(
        "printf '%s\\n' \"$@\" > compile.args\n\
         cat > \"$3\" <<'OCCEC_EOF'\n#!/bin/sh\n{program}\nOCCEC_EOF\n\
         chmod +x \"$3\"\n"
    )
}

/// Temporary working directory the binary runs in.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        Ok(Sandbox {
            dir: tempdir().context("create sandbox")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.join(name).exists()
    }

    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.join(name);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    /// Write an executable `/bin/sh` script.
    pub fn script(&self, name: &str, body: &str) -> Result<PathBuf> {
        let path = self.write(name, &format!("#!/bin/sh\n{body}"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// The occec binary, run inside the sandbox with a clean environment.
    pub fn occec<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_occec"));
        cmd.args(args)
            .current_dir(self.path())
            .env_remove("OCCEC_CLANG")
            .env_remove("OCCEC_OCAMLC")
            .env_remove("OCCEC_OCAMLRUN")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn run<I, S>(&self, args: I, env: &[(&str, &Path)]) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = self.occec(args);
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().context("run occec")
    }

    /// Poll until `name` exists or `timeout` elapses.
    pub fn wait_for(&self, name: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.exists(name) {
                return true;
            }
            thread::sleep(Duration::from_millis(20));
        }
        false
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Whether `tool` is on PATH.
pub fn have_tool(tool: &str) -> bool {
    Command::new("/bin/sh")
        .arg("-c")
        .arg("command -v \"$1\" >/dev/null 2>&1")
        .arg("sh")
        .arg(tool)
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
