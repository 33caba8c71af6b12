// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::fs;
use std::io::{self, Read as _};
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Read a whole document from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print `value` as pretty JSON, or run `human_fn` for text output.
pub fn output_json_or<T>(json: bool, value: &T, human_fn: impl FnOnce()) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/nonexistent/input.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/input.json"));
    }
}
