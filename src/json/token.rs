// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tokens produced by the [`Lexer`](super::lexer::Lexer).

use std::fmt;

use serde::Serialize;

use crate::core::JsonScalar;

/// Location of a character in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number, counted in chars
    pub column: usize,
    /// 0-based char offset from the start of input
    pub offset: usize,
}

impl Position {
    /// Position of the first character.
    pub const fn start() -> Self {
        Position {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token kinds: structural punctuation or a scalar payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// String, number, boolean or null
    Value(JsonScalar),
}

impl TokenKind {
    /// Check if this token carries a scalar payload.
    pub fn is_value(&self) -> bool {
        matches!(self, TokenKind::Value(_))
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::LeftBrace => "'{'".to_string(),
            TokenKind::RightBrace => "'}'".to_string(),
            TokenKind::LeftBracket => "'['".to_string(),
            TokenKind::RightBracket => "']'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Value(JsonScalar::String(s)) => format!("string {s:?}"),
            TokenKind::Value(JsonScalar::Number(n)) => format!("number {n}"),
            TokenKind::Value(JsonScalar::Bool(b)) => format!("boolean {b}"),
            TokenKind::Value(JsonScalar::Null) => "null".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A token and the position where it starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// What was read
    pub kind: TokenKind,
    /// Where it starts
    pub position: Position,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}
