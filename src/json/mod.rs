// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON text handling.
//!
//! - [`lexer`] - Lazy tokenizer over a character stream
//! - [`parser`] - Grammar driver that pushes events into a [`JsonObject`] sink
//! - [`token`] - Token and source position types

pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use parser::{check_syntax, Discard, JsonObject, Parser};
pub use token::{Position, Token, TokenKind};
