// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error type for jsonseed.
//!
//! Every failure of a deserialize call surfaces as a [`DeserializeError`]:
//! - Structural errors from the tokenizer and parser
//! - Type-resolution errors from the descriptor cache
//! - Value errors from seeds, codecs and constructors
//!
//! All of them are fatal for the call that raised them.

use thiserror::Error;

use crate::json::token::Position;

/// Broad classification of a [`DeserializeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed token sequence, missing punctuation, trailing tokens, premature end
    Structural,
    /// Missing constructor or invalid directive configuration
    TypeResolution,
    /// Shape mismatch, missing or null argument, codec failure
    Value,
    /// I/O failure or poisoned lock
    Internal,
}

/// Errors that can occur while deserializing a JSON document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeserializeError {
    /// Tokenizer rejected the input
    #[error("Malformed JSON at {position}: {message}")]
    Malformed {
        /// Where the bad input starts
        position: Position,
        /// What was wrong with it
        message: String,
    },

    /// Parser found a token of the wrong kind
    #[error("Expected {expected} at {position}, found {found}")]
    UnexpectedToken {
        /// What the grammar required
        expected: String,
        /// Description of the token actually found
        found: String,
        /// Position of the offending token
        position: Position,
    },

    /// Input continues after the root object
    #[error("Too many tokens: unexpected {found} at {position} after the root object")]
    TrailingTokens {
        /// Description of the first extra token
        found: String,
        /// Position of the first extra token
        position: Position,
    },

    /// Input ended in the middle of a structure
    #[error("Premature end of data at {position}")]
    PrematureEnd {
        /// Position at which input ran out
        position: Position,
    },

    /// Root value is not an object
    #[error("Root object expected at {position}, found {found}")]
    RootNotObject {
        /// Description of the root token
        found: String,
        /// Position of the root token
        position: Position,
    },

    /// Target type has no registered constructor
    #[error("Class {type_name} doesn't have a primary constructor")]
    MissingConstructor {
        /// Name of the target type
        type_name: String,
    },

    /// Metadata directive is inconsistent with the parameter it decorates
    #[error("Invalid directive on {type_name}.{parameter}: {reason}")]
    InvalidDirective {
        /// Type declaring the parameter
        type_name: String,
        /// Declared parameter name
        parameter: String,
        /// What is inconsistent
        reason: String,
    },

    /// JSON key does not map to any constructor parameter
    #[error("Constructor parameter {name} is not found for class {type_name}")]
    UnknownParameter {
        /// JSON key
        name: String,
        /// Target type
        type_name: String,
    },

    /// Scalar where an array is required
    #[error("An array expected for {type_name}, found {found}")]
    ArrayExpected {
        /// Declared list type
        type_name: String,
        /// What was found instead
        found: String,
    },

    /// Array where an object is required
    #[error("Object of the type {type_name} expected, not an array")]
    ObjectExpected {
        /// Declared object type
        type_name: String,
    },

    /// Object or array where a scalar is required
    #[error("Value of the type {type_name} expected, found {found}")]
    ScalarExpected {
        /// Declared scalar type
        type_name: String,
        /// What was found instead
        found: String,
    },

    /// Scalar element inside a collection of objects
    #[error("Found primitive value in collection of object types ({element_type})")]
    PrimitiveInObjectCollection {
        /// Element type of the collection
        element_type: String,
    },

    /// Object or array element inside a collection of primitives
    #[error("Found object value in collection of primitive types ({element_type})")]
    ObjectInPrimitiveCollection {
        /// Element type of the collection
        element_type: String,
    },

    /// Value runtime type differs from the declared parameter type
    #[error("Type mismatch for parameter {parameter}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Declared parameter name
        parameter: String,
        /// Declared type
        expected: String,
        /// Runtime type of the value
        found: String,
    },

    /// Null for a parameter that is not nullable
    #[error("Received null value for non-null parameter {parameter}")]
    NullValue {
        /// Declared parameter name
        parameter: String,
    },

    /// Required parameter never received a value
    #[error("Missing value for parameter {parameter}")]
    MissingValue {
        /// Declared parameter name
        parameter: String,
    },

    /// Codec received a scalar of the wrong kind
    #[error("Expected {expected}, was: {found}")]
    InvalidValue {
        /// Kind the codec accepts
        expected: String,
        /// The scalar it received
        found: String,
    },

    /// Number does not fit the target primitive
    #[error("Number {value} is out of range for {target}")]
    OutOfRange {
        /// Target primitive
        target: String,
        /// The number received
        value: String,
    },

    /// Date string does not match the configured pattern
    #[error("Cannot parse '{value}' with date format '{pattern}': {reason}")]
    DateFormat {
        /// Configured pattern
        pattern: String,
        /// The string received
        value: String,
        /// chrono's reason
        reason: String,
    },

    /// Reading the source failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message
        message: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl DeserializeError {
    /// Create a malformed-input error.
    pub fn malformed(position: Position, message: impl Into<String>) -> Self {
        DeserializeError::Malformed {
            position,
            message: message.into(),
        }
    }

    /// Create an unexpected-token error.
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        position: Position,
    ) -> Self {
        DeserializeError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            position,
        }
    }

    /// Create a premature-end error.
    pub fn premature_end(position: Position) -> Self {
        DeserializeError::PrematureEnd { position }
    }

    /// Create a missing-constructor error.
    pub fn missing_constructor(type_name: impl Into<String>) -> Self {
        DeserializeError::MissingConstructor {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid-directive error.
    pub fn invalid_directive(
        type_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DeserializeError::InvalidDirective {
            type_name: type_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown-parameter error.
    pub fn unknown_parameter(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        DeserializeError::UnknownParameter {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Create a type-mismatch error.
    pub fn type_mismatch(
        parameter: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        DeserializeError::TypeMismatch {
            parameter: parameter.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a null-value error.
    pub fn null_value(parameter: impl Into<String>) -> Self {
        DeserializeError::NullValue {
            parameter: parameter.into(),
        }
    }

    /// Create a missing-value error.
    pub fn missing_value(parameter: impl Into<String>) -> Self {
        DeserializeError::MissingValue {
            parameter: parameter.into(),
        }
    }

    /// Create a codec input error.
    pub fn invalid_value(expected: impl Into<String>, found: impl Into<String>) -> Self {
        DeserializeError::InvalidValue {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(target: impl Into<String>, value: impl Into<String>) -> Self {
        DeserializeError::OutOfRange {
            target: target.into(),
            value: value.into(),
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeserializeError::Malformed { .. }
            | DeserializeError::UnexpectedToken { .. }
            | DeserializeError::TrailingTokens { .. }
            | DeserializeError::PrematureEnd { .. } => ErrorCategory::Structural,
            DeserializeError::MissingConstructor { .. }
            | DeserializeError::InvalidDirective { .. } => ErrorCategory::TypeResolution,
            DeserializeError::RootNotObject { .. }
            | DeserializeError::UnknownParameter { .. }
            | DeserializeError::ArrayExpected { .. }
            | DeserializeError::ObjectExpected { .. }
            | DeserializeError::ScalarExpected { .. }
            | DeserializeError::PrimitiveInObjectCollection { .. }
            | DeserializeError::ObjectInPrimitiveCollection { .. }
            | DeserializeError::TypeMismatch { .. }
            | DeserializeError::NullValue { .. }
            | DeserializeError::MissingValue { .. }
            | DeserializeError::InvalidValue { .. }
            | DeserializeError::OutOfRange { .. }
            | DeserializeError::DateFormat { .. } => ErrorCategory::Value,
            DeserializeError::Io { .. } | DeserializeError::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Check if this is a structural (syntax) error.
    pub fn is_structural(&self) -> bool {
        self.category() == ErrorCategory::Structural
    }

    /// Source position, for errors raised by the tokenizer or parser.
    pub fn position(&self) -> Option<Position> {
        match self {
            DeserializeError::Malformed { position, .. }
            | DeserializeError::UnexpectedToken { position, .. }
            | DeserializeError::TrailingTokens { position, .. }
            | DeserializeError::PrematureEnd { position }
            | DeserializeError::RootNotObject { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = match self {
            DeserializeError::Malformed { message, .. } => vec![("message", message.clone())],
            DeserializeError::UnexpectedToken {
                expected, found, ..
            } => vec![("expected", expected.clone()), ("found", found.clone())],
            DeserializeError::TrailingTokens { found, .. }
            | DeserializeError::RootNotObject { found, .. } => vec![("found", found.clone())],
            DeserializeError::PrematureEnd { .. } => Vec::new(),
            DeserializeError::MissingConstructor { type_name } => {
                vec![("type", type_name.clone())]
            }
            DeserializeError::InvalidDirective {
                type_name,
                parameter,
                reason,
            } => vec![
                ("type", type_name.clone()),
                ("parameter", parameter.clone()),
                ("reason", reason.clone()),
            ],
            DeserializeError::UnknownParameter { name, type_name } => {
                vec![("key", name.clone()), ("type", type_name.clone())]
            }
            DeserializeError::ArrayExpected { type_name, found }
            | DeserializeError::ScalarExpected { type_name, found } => {
                vec![("type", type_name.clone()), ("found", found.clone())]
            }
            DeserializeError::ObjectExpected { type_name } => vec![("type", type_name.clone())],
            DeserializeError::PrimitiveInObjectCollection { element_type }
            | DeserializeError::ObjectInPrimitiveCollection { element_type } => {
                vec![("element_type", element_type.clone())]
            }
            DeserializeError::TypeMismatch {
                parameter,
                expected,
                found,
            } => vec![
                ("parameter", parameter.clone()),
                ("expected", expected.clone()),
                ("found", found.clone()),
            ],
            DeserializeError::NullValue { parameter }
            | DeserializeError::MissingValue { parameter } => {
                vec![("parameter", parameter.clone())]
            }
            DeserializeError::InvalidValue { expected, found } => {
                vec![("expected", expected.clone()), ("found", found.clone())]
            }
            DeserializeError::OutOfRange { target, value } => {
                vec![("target", target.clone()), ("value", value.clone())]
            }
            DeserializeError::DateFormat {
                pattern,
                value,
                reason,
            } => vec![
                ("pattern", pattern.clone()),
                ("value", value.clone()),
                ("reason", reason.clone()),
            ],
            DeserializeError::Io { message } => vec![("message", message.clone())],
            DeserializeError::Other(msg) => vec![("message", msg.clone())],
        };
        if let Some(position) = self.position() {
            fields.push(("line", position.line.to_string()));
            fields.push(("column", position.column.to_string()));
        }
        fields
    }
}

impl From<std::io::Error> for DeserializeError {
    fn from(err: std::io::Error) -> Self {
        DeserializeError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for jsonseed operations.
pub type Result<T> = std::result::Result<T, DeserializeError>;
