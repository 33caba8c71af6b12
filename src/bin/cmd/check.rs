// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Check command - validate the syntax of a document.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use serde::Serialize;

use crate::common::{output_json_or, read_input, Result};

/// Validate that a document is a single well-formed JSON object.
#[derive(Args, Clone, Debug)]
pub struct CheckCmd {
    /// Input file, or `-` for stdin
    #[arg(value_name = "FILE|-")]
    input: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct CheckReport {
    input: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<&'static str, String>,
}

impl CheckCmd {
    pub fn run(self) -> Result<()> {
        let text = read_input(&self.input)?;
        let input = self.input.display().to_string();

        let error = jsonseed::check_syntax(&text).err();
        let report = CheckReport {
            input: input.clone(),
            status: if error.is_some() { "error" } else { "ok" },
            message: error.as_ref().map(ToString::to_string),
            line: error.as_ref().and_then(|e| e.position()).map(|p| p.line),
            column: error.as_ref().and_then(|e| e.position()).map(|p| p.column),
            fields: error
                .as_ref()
                .map(|e| e.log_fields().into_iter().collect())
                .unwrap_or_default(),
        };

        output_json_or(self.json, &report, || {
            if error.is_none() {
                println!("{input}: ok");
            }
        })?;

        match error {
            Some(e) => bail!("{input}: {e}"),
            None => Ok(()),
        }
    }
}
