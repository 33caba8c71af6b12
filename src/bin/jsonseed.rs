// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # jsonseed CLI
//!
//! Tooling over the jsonseed tokenizer and parser.
//!
//! ## Usage
//!
//! ```sh
//! # Print the token stream
//! jsonseed tokens book.json
//!
//! # Token stream as JSON, from stdin
//! cat book.json | jsonseed tokens --json -
//!
//! # Validate syntax
//! jsonseed check book.json
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{CheckCmd, TokensCmd};
use common::Result;

/// jsonseed - JSON tokenizer and syntax checker
#[derive(Parser, Clone)]
#[command(name = "jsonseed")]
#[command(about = "Token dump and syntax check for JSON documents", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Print the token stream of a document
    Tokens(TokensCmd),

    /// Validate that a document is a well-formed JSON object
    Check(CheckCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens(cmd) => cmd.run(),
        Commands::Check(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
