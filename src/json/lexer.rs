// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Pull-based JSON tokenizer.
//!
//! The lexer reads characters only as the caller asks for the next token,
//! and tracks line/column/offset for every token it produces so errors can
//! point back into the source.
//!
//! # Example
//!
//! ```
//! use jsonseed::json::lexer::tokenize;
//! use jsonseed::json::token::TokenKind;
//!
//! let kinds: Vec<TokenKind> = tokenize(r#"{"a": [1, true]}"#)
//!     .map(|t| t.map(|t| t.kind))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(kinds.len(), 8);
//! ```

use std::iter::{FusedIterator, Peekable};
use std::str::Chars;

use super::token::{Position, Token, TokenKind};
use crate::core::{DeserializeError, JsonNumber, JsonScalar, Result};

/// Tokenize a string slice.
pub fn tokenize(text: &str) -> Lexer<Chars<'_>> {
    Lexer::new(text.chars())
}

/// Lexer over any character stream.
///
/// The token sequence is finite and cannot be restarted: after the end of
/// input or the first error, every further call yields nothing.
pub struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    /// Position of the next unread character
    position: Position,
    finished: bool,
}

impl<I: Iterator<Item = char>> Lexer<I> {
    /// Create a lexer reading from `chars`.
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            position: Position::start(),
            finished: false,
        }
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Read the next token, or `None` at the end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.finished {
            return Ok(None);
        }
        let result = self.read_token();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position.offset += 1;
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.bump();
        }
    }

    fn read_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();
        let start = self.position;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let kind = match c {
            '{' | '}' | '[' | ']' | ',' | ':' => {
                self.bump();
                match c {
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    ',' => TokenKind::Comma,
                    _ => TokenKind::Colon,
                }
            }
            '"' => {
                self.bump();
                TokenKind::Value(JsonScalar::String(self.read_string()?))
            }
            '-' | '0'..='9' => TokenKind::Value(JsonScalar::Number(self.read_number(start)?)),
            c if c.is_ascii_alphabetic() => TokenKind::Value(self.read_literal(start)?),
            other => {
                return Err(DeserializeError::malformed(
                    start,
                    format!("Unexpected character {other:?}"),
                ))
            }
        };

        Ok(Some(Token::new(kind, start)))
    }

    fn read_string(&mut self) -> Result<String> {
        let mut buf = String::new();
        loop {
            let at = self.position;
            let c = self
                .bump()
                .ok_or_else(|| DeserializeError::premature_end(self.position))?;
            match c {
                '"' => return Ok(buf),
                '\\' => buf.push(self.read_escape(at)?),
                c if (c as u32) < 0x20 => {
                    return Err(DeserializeError::malformed(
                        at,
                        format!("Unescaped control character {c:?} in string"),
                    ))
                }
                c => buf.push(c),
            }
        }
    }

    fn read_escape(&mut self, at: Position) -> Result<char> {
        let c = self
            .bump()
            .ok_or_else(|| DeserializeError::premature_end(self.position))?;
        match c {
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'b' => Ok('\u{8}'),
            'f' => Ok('\u{c}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'u' => self.read_unicode_escape(at),
            other => Err(DeserializeError::malformed(
                at,
                format!("Invalid escape sequence '\\{other}'"),
            )),
        }
    }

    fn read_unicode_escape(&mut self, at: Position) -> Result<char> {
        let first = self.read_hex4(at)?;
        let code = match first {
            0xD800..=0xDBFF => {
                match (self.bump(), self.bump()) {
                    (Some('\\'), Some('u')) => {}
                    (None, _) | (_, None) => {
                        return Err(DeserializeError::premature_end(self.position))
                    }
                    _ => {
                        return Err(DeserializeError::malformed(
                            at,
                            "Unpaired surrogate in \\u escape",
                        ))
                    }
                }
                let second = self.read_hex4(at)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(DeserializeError::malformed(
                        at,
                        "Unpaired surrogate in \\u escape",
                    ));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(DeserializeError::malformed(
                    at,
                    "Unpaired surrogate in \\u escape",
                ))
            }
            _ => first,
        };
        char::from_u32(code)
            .ok_or_else(|| DeserializeError::malformed(at, format!("Invalid code point {code:#x}")))
    }

    fn read_hex4(&mut self, at: Position) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let c = self
                .bump()
                .ok_or_else(|| DeserializeError::premature_end(self.position))?;
            let digit = c.to_digit(16).ok_or_else(|| {
                DeserializeError::malformed(at, format!("Invalid hex digit {c:?} in \\u escape"))
            })?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn read_digits(&mut self, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
            count += 1;
        }
        count
    }

    fn read_number(&mut self, start: Position) -> Result<JsonNumber> {
        let mut text = String::new();
        let mut is_float = false;

        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }

        match self.peek() {
            Some('0') => {
                text.push('0');
                self.bump();
                if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    return Err(DeserializeError::malformed(
                        start,
                        "Leading zeros are not allowed in numbers",
                    ));
                }
            }
            Some(c) if c.is_ascii_digit() => {
                self.read_digits(&mut text);
            }
            _ => {
                return Err(DeserializeError::malformed(
                    start,
                    format!("Invalid number '{text}'"),
                ))
            }
        }

        if self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.bump();
            if self.read_digits(&mut text) == 0 {
                return Err(DeserializeError::malformed(
                    start,
                    "Expected digit after decimal point",
                ));
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            text.push('e');
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            if self.read_digits(&mut text) == 0 {
                return Err(DeserializeError::malformed(
                    start,
                    "Expected digit in exponent",
                ));
            }
        }

        if !is_float {
            if let Ok(v) = text.parse::<i64>() {
                return Ok(JsonNumber::Int(v));
            }
            if let Ok(v) = text.parse::<u64>() {
                return Ok(JsonNumber::UInt(v));
            }
        }

        let value: f64 = text
            .parse()
            .map_err(|_| DeserializeError::malformed(start, format!("Invalid number '{text}'")))?;
        if !value.is_finite() {
            return Err(DeserializeError::malformed(
                start,
                format!("Number '{text}' is out of range"),
            ));
        }
        Ok(JsonNumber::Float(value))
    }

    fn read_literal(&mut self, start: Position) -> Result<JsonScalar> {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() {
                break;
            }
            word.push(c);
            self.bump();
        }
        match word.as_str() {
            "true" => Ok(JsonScalar::Bool(true)),
            "false" => Ok(JsonScalar::Bool(false)),
            "null" => Ok(JsonScalar::Null),
            _ => Err(DeserializeError::malformed(
                start,
                format!("Invalid literal '{word}'"),
            )),
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<I: Iterator<Item = char>> FusedIterator for Lexer<I> {}
