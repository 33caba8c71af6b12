// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value codec interface.
//!
//! A codec converts between one JSON scalar and one native value. The
//! codec layer is organized in two traits:
//!
//! - [`ValueCodec`] - Typed interface implemented by concrete codecs
//! - [`DynValueCodec`] - Object-safe form stored in descriptors and registries
//!
//! Every `ValueCodec` is a `DynValueCodec` through a blanket impl, so user
//! codecs only ever implement the typed trait.
//!
//! ## Example
//!
//! ```
//! use jsonseed::encoding::{DynValueCodec, ValueCodec};
//! use jsonseed::{DeserializeError, JsonScalar, Result};
//!
//! struct Upper;
//!
//! impl ValueCodec for Upper {
//!     type Value = String;
//!
//!     fn from_json(&self, scalar: &JsonScalar) -> Result<String> {
//!         scalar
//!             .as_str()
//!             .map(str::to_uppercase)
//!             .ok_or_else(|| DeserializeError::invalid_value("string", scalar.to_string()))
//!     }
//!
//!     fn to_json(&self, value: &String) -> Result<JsonScalar> {
//!         Ok(JsonScalar::String(value.to_lowercase()))
//!     }
//! }
//!
//! let native = Upper.decode(&JsonScalar::String("abc".into())).unwrap();
//! assert_eq!(native.downcast::<String>().unwrap(), "ABC");
//! ```

use std::any::{type_name, Any, TypeId};

use crate::core::{DeserializeError, JsonScalar, Native, Result};

// =============================================================================
// Value Codec Trait
// =============================================================================

/// Typed bidirectional converter between a JSON scalar and a native value.
///
/// # Type Parameters
///
/// * `Value` - The native type produced by decoding
pub trait ValueCodec: Send + Sync + 'static {
    /// Native type this codec produces.
    type Value: Any + Send;

    /// Convert a scalar read from JSON into a native value.
    fn from_json(&self, scalar: &JsonScalar) -> Result<Self::Value>;

    /// Convert a native value back into a scalar.
    fn to_json(&self, value: &Self::Value) -> Result<JsonScalar>;
}

// =============================================================================
// Dynamic Codec Trait
// =============================================================================

/// Object-safe version of [`ValueCodec`] for use in trait objects.
pub trait DynValueCodec: Send + Sync {
    /// Decode a scalar into a type-erased value.
    fn decode(&self, scalar: &JsonScalar) -> Result<Native>;

    /// Encode a type-erased value; fails if it is not this codec's type.
    fn encode(&self, value: &dyn Any) -> Result<JsonScalar>;

    /// `TypeId` of the native type.
    fn value_type(&self) -> TypeId;

    /// Readable name of the native type.
    fn value_type_name(&self) -> &'static str;
}

impl<C: ValueCodec> DynValueCodec for C {
    fn decode(&self, scalar: &JsonScalar) -> Result<Native> {
        self.from_json(scalar).map(Native::value)
    }

    fn encode(&self, value: &dyn Any) -> Result<JsonScalar> {
        match value.downcast_ref::<C::Value>() {
            Some(typed) => self.to_json(typed),
            None => Err(DeserializeError::invalid_value(
                type_name::<C::Value>(),
                "a value of another type",
            )),
        }
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<C::Value>()
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<C::Value>()
    }
}

// =============================================================================
// Raw Scalar Codec
// =============================================================================

/// Pass-through codec: the value is the scalar itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawScalarCodec;

impl ValueCodec for RawScalarCodec {
    type Value = JsonScalar;

    fn from_json(&self, scalar: &JsonScalar) -> Result<JsonScalar> {
        Ok(scalar.clone())
    }

    fn to_json(&self, value: &JsonScalar) -> Result<JsonScalar> {
        Ok(value.clone())
    }
}

// =============================================================================
// Tests
// =============================================================================
