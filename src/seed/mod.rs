// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Incremental object construction.
//!
//! A seed is a [`JsonObject`] sink that accumulates values while the parser
//! walks the document and produces the finished value once, when
//! [`Seed::spawn`] consumes it. Seeds form a tree that mirrors the JSON
//! nesting:
//!
//! - [`ObjectSeed`] - Builds one object through its type's descriptor
//! - [`ObjectListSeed`] - Builds a list whose elements are objects or lists
//! - [`ValueListSeed`] - Builds a list of codec-decoded scalars

mod list;
mod object;

pub use list::{ObjectListSeed, ValueListSeed};
pub use object::ObjectSeed;

use std::sync::Arc;

use tracing::trace;

use crate::core::{DeserializeError, Native, Result};
use crate::encoding::DynValueCodec;
use crate::json::JsonObject;
use crate::schema::types::UpcastFn;
use crate::schema::{DescriptorCache, TypeRef};

/// A sink that produces a value when finished.
pub trait Seed: JsonObject {
    /// This seed as a parser sink.
    fn as_object(&mut self) -> &mut dyn JsonObject;

    /// Finish construction. Consuming the box makes this callable once.
    fn spawn(self: Box<Self>) -> Result<Native>;
}

/// Pick the seed for a value of `type_ref`.
///
/// `codec` applies to the innermost type and `upcast` to every object
/// constructed at the innermost level. `is_list` tells whether the value
/// about to be read is a JSON array.
pub(crate) fn seed_for<'c>(
    cache: &'c DescriptorCache,
    type_ref: &TypeRef,
    codec: Option<&Arc<dyn DynValueCodec>>,
    upcast: Option<&UpcastFn>,
    is_list: bool,
) -> Result<Box<dyn Seed + 'c>> {
    trace!(type_name = %type_ref, is_list, "dispatching seed");

    if let TypeRef::List(element) = type_ref {
        if !is_list {
            return Err(DeserializeError::ArrayExpected {
                type_name: type_ref.name(),
                found: "an object".to_string(),
            });
        }
        let element_codec = match element.as_ref() {
            TypeRef::List(_) => None,
            _ => codec,
        };
        let seed: Box<dyn Seed + 'c> = match element_codec {
            Some(codec) => Box::new(ValueListSeed::new(element.name(), Arc::clone(codec))),
            None => Box::new(ObjectListSeed::new(
                cache,
                element.as_ref().clone(),
                codec.cloned(),
                upcast.cloned(),
            )),
        };
        return Ok(seed);
    }

    if is_list {
        return Err(DeserializeError::ObjectExpected {
            type_name: type_ref.name(),
        });
    }

    match type_ref {
        TypeRef::Object(object) if codec.is_none() => {
            let descriptor = cache.descriptor_for(object)?;
            Ok(Box::new(ObjectSeed::new(cache, descriptor, upcast.cloned())))
        }
        _ => Err(DeserializeError::ScalarExpected {
            type_name: type_ref.name(),
            found: "an object".to_string(),
        }),
    }
}
