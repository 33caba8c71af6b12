// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod check;
mod tokens;

pub use check::CheckCmd;
pub use tokens::TokensCmd;
