// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tokens command - print the token stream of a document.

use std::path::PathBuf;

use clap::Args;

use crate::common::{output_json_or, read_input, Result};
use jsonseed::json::tokenize;
use jsonseed::Token;

/// Print the token stream of a JSON document.
#[derive(Args, Clone, Debug)]
pub struct TokensCmd {
    /// Input file, or `-` for stdin
    #[arg(value_name = "FILE|-")]
    input: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl TokensCmd {
    pub fn run(self) -> Result<()> {
        let text = read_input(&self.input)?;
        let tokens = tokenize(&text).collect::<jsonseed::Result<Vec<Token>>>()?;

        output_json_or(self.json, &tokens, || {
            for token in &tokens {
                println!(
                    "{:>4}:{:<4} {}",
                    token.position.line, token.position.column, token.kind
                );
            }
        })
    }
}
