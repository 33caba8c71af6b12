// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Recursive-descent JSON parser driving a [`JsonObject`] sink.
//!
//! The parser never builds a document tree. Each member it reads is pushed
//! into the current sink; nested objects and arrays ask the sink for a child
//! sink and continue inside it. What the sink builds is entirely its own
//! business, which keeps this module independent of any target type.
//!
//! ```text
//! object := '{' (member (',' member)*)? '}'
//! member := string ':' value
//! array  := '[' (value (',' value)*)? ']'
//! value  := object | array | string | number | boolean | null
//! ```

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::core::{DeserializeError, JsonScalar, Result};

/// Receiver of parse events.
///
/// Array elements are delivered to the array's sink under the name of the
/// property that holds the array.
pub trait JsonObject {
    /// A scalar member (or array element) was read.
    fn set_scalar(&mut self, name: &str, value: JsonScalar) -> Result<()>;

    /// An object value starts; returns the sink for its members.
    fn begin_object(&mut self, name: &str) -> Result<&mut dyn JsonObject>;

    /// An array value starts; returns the sink for its elements.
    fn begin_array(&mut self, name: &str) -> Result<&mut dyn JsonObject>;
}

/// Sink that accepts every event and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl JsonObject for Discard {
    fn set_scalar(&mut self, _name: &str, _value: JsonScalar) -> Result<()> {
        Ok(())
    }

    fn begin_object(&mut self, _name: &str) -> Result<&mut dyn JsonObject> {
        Ok(self)
    }

    fn begin_array(&mut self, _name: &str) -> Result<&mut dyn JsonObject> {
        Ok(self)
    }
}

/// JSON parser over a [`Lexer`].
pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Create a parser reading tokens from `lexer`.
    pub fn new(lexer: Lexer<I>) -> Self {
        Self { lexer }
    }

    /// Parse one root object into `root`, then require end of input.
    pub fn parse(mut self, root: &mut dyn JsonObject) -> Result<()> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::LeftBrace => {}
            TokenKind::LeftBracket | TokenKind::Value(_) => {
                return Err(DeserializeError::RootNotObject {
                    found: token.kind.describe(),
                    position: token.position,
                })
            }
            other => {
                return Err(DeserializeError::unexpected_token(
                    "'{'",
                    other.describe(),
                    token.position,
                ))
            }
        }

        self.parse_object_body(root)?;

        if let Some(extra) = self.lexer.next_token()? {
            return Err(DeserializeError::TrailingTokens {
                found: extra.kind.describe(),
                position: extra.position,
            });
        }
        Ok(())
    }

    /// Members up to and including the closing `}`.
    fn parse_object_body(&mut self, object: &mut dyn JsonObject) -> Result<()> {
        let mut first = true;
        while let Some(token) = self.next_item(&TokenKind::RightBrace, first)? {
            first = false;
            let name = match token.kind {
                TokenKind::Value(JsonScalar::String(name)) => name,
                other => {
                    return Err(DeserializeError::unexpected_token(
                        "property name",
                        other.describe(),
                        token.position,
                    ))
                }
            };
            self.expect(TokenKind::Colon)?;
            let value = self.next_token()?;
            self.parse_value(object, &name, value)?;
        }
        Ok(())
    }

    /// Elements up to and including the closing `]`.
    fn parse_array_body(&mut self, array: &mut dyn JsonObject, name: &str) -> Result<()> {
        let mut first = true;
        while let Some(token) = self.next_item(&TokenKind::RightBracket, first)? {
            first = false;
            self.parse_value(array, name, token)?;
        }
        Ok(())
    }

    /// Next item of a comma-separated list, or `None` once `close` is read.
    ///
    /// A `close` right after a comma is returned as an item, so the caller
    /// rejects trailing commas.
    fn next_item(&mut self, close: &TokenKind, first: bool) -> Result<Option<Token>> {
        let token = self.next_token()?;
        if &token.kind == close {
            return Ok(None);
        }
        if first {
            return Ok(Some(token));
        }
        if token.kind != TokenKind::Comma {
            return Err(DeserializeError::unexpected_token(
                format!("',' or {}", close.describe()),
                token.kind.describe(),
                token.position,
            ));
        }
        self.next_token().map(Some)
    }

    fn parse_value(&mut self, current: &mut dyn JsonObject, name: &str, token: Token) -> Result<()> {
        match token.kind {
            TokenKind::Value(scalar) => current.set_scalar(name, scalar),
            TokenKind::LeftBrace => {
                let child = current.begin_object(name)?;
                self.parse_object_body(child)
            }
            TokenKind::LeftBracket => {
                let child = current.begin_array(name)?;
                self.parse_array_body(child, name)
            }
            other => Err(DeserializeError::unexpected_token(
                "value",
                other.describe(),
                token.position,
            )),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        let token = self.next_token()?;
        if token.kind != kind {
            return Err(DeserializeError::unexpected_token(
                kind.describe(),
                token.kind.describe(),
                token.position,
            ));
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Token> {
        match self.lexer.next_token()? {
            Some(token) => Ok(token),
            None => Err(DeserializeError::premature_end(self.lexer.position())),
        }
    }
}

/// Validate that `text` is a single well-formed JSON object.
pub fn check_syntax(text: &str) -> Result<()> {
    Parser::new(Lexer::new(text.chars())).parse(&mut Discard)
}
