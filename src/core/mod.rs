// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout jsonseed.
//!
//! This module provides the foundational types for the library:
//! - [`DeserializeError`] - The single error type of every operation
//! - [`JsonScalar`] / [`JsonNumber`] - Scalar payloads read from JSON text
//! - [`Native`] - Type-erased constructed values
//! - [`PrimitiveType`] - Primitive types with default codecs

pub mod error;
pub mod value;

pub use error::{DeserializeError, ErrorCategory, Result};
pub use value::{JsonNumber, JsonScalar, Native, Primitive, PrimitiveType};
