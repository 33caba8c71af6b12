// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar codecs.
//!
//! This module provides the converters between JSON scalars and native values:
//! - [`codec`] - Typed and type-erased codec traits
//! - [`primitive`] - Default codecs for primitive types
//! - [`date`] - Pattern-based date codecs over chrono
//! - [`registry`] - Default codec per primitive type

pub mod codec;
pub mod date;
pub mod primitive;
pub mod registry;

pub use codec::{DynValueCodec, RawScalarCodec, ValueCodec};
pub use date::{date_codec_for, DateCodec, DateLike};
pub use primitive::{BoolCodec, FloatCodec, FloatPrimitive, IntegerCodec, StringCodec};
pub use registry::CodecRegistry;
