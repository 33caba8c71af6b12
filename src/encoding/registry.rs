// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Default codec per primitive type.
//!
//! The registry starts with the built-in codecs and lets callers replace
//! any of them before it is handed to a
//! [`DescriptorCache`](crate::schema::DescriptorCache).
//!
//! # Example
//!
//! ```
//! use jsonseed::encoding::{CodecRegistry, IntegerCodec};
//! use jsonseed::PrimitiveType;
//!
//! let mut registry = CodecRegistry::new();
//! registry.register(PrimitiveType::Int32, IntegerCodec::<i32>::new()).unwrap();
//! assert!(registry.get(PrimitiveType::Int32).is_some());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::codec::{DynValueCodec, RawScalarCodec};
use super::primitive::{BoolCodec, FloatCodec, IntegerCodec, StringCodec};
use crate::core::{DeserializeError, PrimitiveType, Result};

/// Registry of default codecs keyed by primitive type.
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: HashMap<PrimitiveType, Arc<dyn DynValueCodec>>,
    raw: Arc<dyn DynValueCodec>,
}

impl CodecRegistry {
    /// Create a registry holding the built-in codecs.
    pub fn new() -> Self {
        let mut codecs: HashMap<PrimitiveType, Arc<dyn DynValueCodec>> = HashMap::new();
        codecs.insert(PrimitiveType::Bool, Arc::new(BoolCodec));
        codecs.insert(PrimitiveType::Int8, Arc::new(IntegerCodec::<i8>::new()));
        codecs.insert(PrimitiveType::Int16, Arc::new(IntegerCodec::<i16>::new()));
        codecs.insert(PrimitiveType::Int32, Arc::new(IntegerCodec::<i32>::new()));
        codecs.insert(PrimitiveType::Int64, Arc::new(IntegerCodec::<i64>::new()));
        codecs.insert(PrimitiveType::UInt8, Arc::new(IntegerCodec::<u8>::new()));
        codecs.insert(PrimitiveType::UInt16, Arc::new(IntegerCodec::<u16>::new()));
        codecs.insert(PrimitiveType::UInt32, Arc::new(IntegerCodec::<u32>::new()));
        codecs.insert(PrimitiveType::UInt64, Arc::new(IntegerCodec::<u64>::new()));
        codecs.insert(PrimitiveType::Float32, Arc::new(FloatCodec::<f32>::new()));
        codecs.insert(PrimitiveType::Float64, Arc::new(FloatCodec::<f64>::new()));
        codecs.insert(PrimitiveType::String, Arc::new(StringCodec));
        Self {
            codecs,
            raw: Arc::new(RawScalarCodec),
        }
    }

    /// Replace the default codec for `primitive`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the codec does not produce the primitive's
    /// native type.
    pub fn register<C: DynValueCodec + 'static>(
        &mut self,
        primitive: PrimitiveType,
        codec: C,
    ) -> Result<()> {
        self.register_arc(primitive, Arc::new(codec))
    }

    /// Replace the default codec for `primitive` with a shared codec.
    pub fn register_arc(
        &mut self,
        primitive: PrimitiveType,
        codec: Arc<dyn DynValueCodec>,
    ) -> Result<()> {
        if codec.value_type() != primitive.native_type_id() {
            return Err(DeserializeError::invalid_value(
                format!("codec producing {primitive}"),
                codec.value_type_name(),
            ));
        }
        self.codecs.insert(primitive, codec);
        Ok(())
    }

    /// Get the codec for `primitive`.
    pub fn get(&self, primitive: PrimitiveType) -> Option<Arc<dyn DynValueCodec>> {
        self.codecs.get(&primitive).cloned()
    }

    /// Pass-through codec producing [`JsonScalar`](crate::JsonScalar) values.
    pub fn raw(&self) -> Arc<dyn DynValueCodec> {
        Arc::clone(&self.raw)
    }

    /// Get the number of registered codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut primitives: Vec<_> = self.codecs.keys().map(|p| p.rust_name()).collect();
        primitives.sort_unstable();
        f.debug_struct("CodecRegistry")
            .field("primitives", &primitives)
            .finish()
    }
}
