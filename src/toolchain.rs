// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Resolve a source file to the toolchain that builds and runs it.
// Author: Lukas Bower

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Toolchain families occec knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    /// Compiled to a directly executable native binary (C via clang).
    NativeCompiled,
    /// Compiled to bytecode run by a separate interpreter (OCaml via ocamlc/ocamlrun).
    BytecodeInterpreted,
}

/// Errors raised while resolving a toolchain or deriving its file names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolchainError {
    /// The source suffix matches no known toolchain.
    #[error("Only .c and .ml extensions are supported, the file provided is not valid. ({path})")]
    Unresolved {
        /// Offending source path.
        path: String,
    },
    /// A byproduct name could not be derived from the source path.
    #[error("cannot derive {extension} byproduct name from '{path}'")]
    Underivable {
        /// Source path the name was derived from.
        path: String,
        /// Byproduct extension that was requested.
        extension: &'static str,
    },
}

/// Static description of one toolchain. Executable names may be replaced
/// through configuration; everything else is fixed per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDescriptor {
    kind: Toolchain,
    compiler: String,
    runner: Option<String>,
    base_flags: &'static [&'static str],
    byproduct_extensions: &'static [&'static str],
}

const NATIVE_SUFFIX: &str = ".c";
const BYTECODE_SUFFIX: &str = ".ml";

const CLANG: &str = "clang";
const CLANG_FLAGS: &[&str] = &["-Wall", "-Wextra", "-fsanitize=address"];

const OCAMLC: &str = "ocamlc";
const OCAMLRUN: &str = "ocamlrun";
const OCAML_BYPRODUCTS: &[&str] = &[".cmi", ".cmo"];

impl Toolchain {
    /// Every supported toolchain, in resolution order.
    pub const ALL: [Toolchain; 2] = [Toolchain::NativeCompiled, Toolchain::BytecodeInterpreted];

    /// Pick the toolchain for `source` by its filename suffix.
    pub fn resolve(source: &str) -> Result<Self, ToolchainError> {
        Toolchain::ALL
            .into_iter()
            .find(|tc| source.len() >= tc.suffix().len() && source.ends_with(tc.suffix()))
            .ok_or_else(|| ToolchainError::Unresolved {
                path: source.to_owned(),
            })
    }

    /// Source suffix handled by this toolchain.
    pub fn suffix(self) -> &'static str {
        match self {
            Toolchain::NativeCompiled => NATIVE_SUFFIX,
            Toolchain::BytecodeInterpreted => BYTECODE_SUFFIX,
        }
    }

    /// Default descriptor for this toolchain.
    pub fn descriptor(self) -> ToolchainDescriptor {
        match self {
            Toolchain::NativeCompiled => ToolchainDescriptor {
                kind: self,
                compiler: CLANG.to_owned(),
                runner: None,
                base_flags: CLANG_FLAGS,
                byproduct_extensions: &[],
            },
            Toolchain::BytecodeInterpreted => ToolchainDescriptor {
                kind: self,
                compiler: OCAMLC.to_owned(),
                runner: Some(OCAMLRUN.to_owned()),
                base_flags: &[],
                byproduct_extensions: OCAML_BYPRODUCTS,
            },
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toolchain::NativeCompiled => f.write_str("native"),
            Toolchain::BytecodeInterpreted => f.write_str("bytecode"),
        }
    }
}

impl ToolchainDescriptor {
    /// Toolchain family this descriptor belongs to.
    pub fn kind(&self) -> Toolchain {
        self.kind
    }

    /// Executable invoked for the compile step.
    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// Separate executable that runs the artifact, if any.
    pub fn runner(&self) -> Option<&str> {
        self.runner.as_deref()
    }

    /// Flags placed ahead of user flags on the compile line.
    pub fn base_flags(&self) -> &'static [&'static str] {
        self.base_flags
    }

    /// Extensions of the auxiliary files left next to the source.
    pub fn byproduct_extensions(&self) -> &'static [&'static str] {
        self.byproduct_extensions
    }

    /// Replace the compiler executable.
    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Replace the runner executable. Has no effect on toolchains that run
    /// their artifact directly.
    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        if self.runner.is_some() {
            self.runner = Some(runner.into());
        }
        self
    }

    /// Byproduct paths for `source`, one entry per byproduct extension.
    ///
    /// The source suffix is swapped for each extension. Entries whose name
    /// cannot be derived (wrong suffix, empty stem) are returned as errors so
    /// the caller can report them individually.
    pub fn byproducts(&self, source: &str) -> Vec<Result<PathBuf, ToolchainError>> {
        let stem = source
            .strip_suffix(self.kind.suffix())
            .filter(|stem| !stem.is_empty() && !stem.ends_with('/'));
        self.byproduct_extensions
            .iter()
            .map(|&extension| match stem {
                Some(stem) => Ok(PathBuf::from(format!("{stem}{extension}"))),
                None => Err(ToolchainError::Underivable {
                    path: source.to_owned(),
                    extension,
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_suffix() {
        assert_eq!(Toolchain::resolve("prog.c"), Ok(Toolchain::NativeCompiled));
        assert_eq!(Toolchain::resolve(".c"), Ok(Toolchain::NativeCompiled));
        assert_eq!(Toolchain::resolve("dir/x.c"), Ok(Toolchain::NativeCompiled));
        assert_eq!(Toolchain::resolve("prog.ml"), Ok(Toolchain::BytecodeInterpreted));
        assert_eq!(Toolchain::resolve(".ml"), Ok(Toolchain::BytecodeInterpreted));
    }

    #[test]
    fn rejects_everything_else() {
        for path in ["", "c", "ml", "prog.cc", "prog.mli", "prog.C", "prog.c.txt", "prog"] {
            assert_eq!(
                Toolchain::resolve(path),
                Err(ToolchainError::Unresolved {
                    path: path.to_owned()
                }),
                "{path:?} should not resolve"
            );
        }
    }

    #[test]
    fn descriptors_match_their_toolchain() {
        let native = Toolchain::NativeCompiled.descriptor();
        assert_eq!(native.compiler(), "clang");
        assert_eq!(native.runner(), None);
        assert_eq!(native.base_flags(), ["-Wall", "-Wextra", "-fsanitize=address"]);
        assert!(native.byproduct_extensions().is_empty());

        let bytecode = Toolchain::BytecodeInterpreted.descriptor();
        assert_eq!(bytecode.compiler(), "ocamlc");
        assert_eq!(bytecode.runner(), Some("ocamlrun"));
        assert!(bytecode.base_flags().is_empty());
        assert_eq!(bytecode.byproduct_extensions(), [".cmi", ".cmo"]);
    }

    #[test]
    fn overrides_replace_executables_only() {
        let native = Toolchain::NativeCompiled
            .descriptor()
            .with_compiler("/opt/llvm/bin/clang")
            .with_runner("ignored");
        assert_eq!(native.compiler(), "/opt/llvm/bin/clang");
        assert_eq!(native.runner(), None);
        assert_eq!(native.base_flags().len(), 3);

        let bytecode = Toolchain::BytecodeInterpreted
            .descriptor()
            .with_runner("/usr/local/bin/ocamlrun");
        assert_eq!(bytecode.runner(), Some("/usr/local/bin/ocamlrun"));
    }

    #[test]
    fn byproducts_follow_the_source_stem() {
        let bytecode = Toolchain::BytecodeInterpreted.descriptor();
        let paths: Vec<_> = bytecode
            .byproducts("src/hello.ml")
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            paths,
            [PathBuf::from("src/hello.cmi"), PathBuf::from("src/hello.cmo")]
        );
        assert!(Toolchain::NativeCompiled
            .descriptor()
            .byproducts("hello.c")
            .is_empty());
    }

    #[test]
    fn byproducts_need_a_stem() {
        let bytecode = Toolchain::BytecodeInterpreted.descriptor();
        for source in [".ml", "dir/.ml", "hello.c"] {
            let derived = bytecode.byproducts(source);
            assert_eq!(derived.len(), 2);
            assert!(derived.iter().all(Result::is_err), "{source:?}");
        }
    }
}
