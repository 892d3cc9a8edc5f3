// Copyright © 2026 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Operator-facing banners for each pipeline stage.
// Author: Lukas Bower

use std::fmt::Display;

use colored::Colorize;

/// Banner printed on success only.
pub const SUCCESS_BANNER: &str = "[SUCCESS] All operations went fine.";

/// Announce a stage, e.g. `=> Executing compiled.code`.
pub fn stage(message: impl Display) {
    println!("{}", format!("=> {message}").cyan());
}

/// Report an error on stderr.
pub fn error(message: impl Display) {
    eprintln!("{}", format!("[ERROR] {message}").red().bold());
}

/// Print the usage line under a usage error.
pub fn usage(line: impl Display) {
    eprintln!("{line}");
}

/// Print [`SUCCESS_BANNER`] once the program ran successfully.
pub fn success() {
    println!("{}", SUCCESS_BANNER.green().bold());
}
