// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # jsonseed
//!
//! Constructor-driven JSON deserialization.
//!
//! A target type declares its constructor parameters once through
//! [`FromJson`]; documents are then parsed straight into instances without
//! building an intermediate tree:
//! - **Tokenizer and parser** in the [`json`](crate::json) module
//! - **Codecs** for primitives and dates in the [`encoding`](crate::encoding) module
//! - **Type metadata** and the descriptor cache in the [`schema`](crate::schema) module
//! - **Seeds** that build objects incrementally in the [`seed`](crate::seed) module
//!
//! ## Architecture
//!
//! - `core/` - Error type and value model
//! - `json/` - Lexer, parser and the `JsonObject` sink trait
//! - `encoding/` - `ValueCodec` implementations and the default codec registry
//! - `schema/` - `FromJson`, descriptors and `DescriptorCache`
//! - `seed/` - Object and list seeds, dispatched by declared type
//!
//! ## Example
//!
//! ```rust
//! use jsonseed::{Arguments, DescriptorBuilder, FromJson, Result};
//!
//! struct Author {
//!     name: String,
//!     countries: Vec<String>,
//! }
//!
//! impl FromJson for Author {
//!     fn describe(d: &mut DescriptorBuilder) {
//!         d.value::<String>("name");
//!         d.values::<String>("countries").json_name("publishedCountry");
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self> {
//!         Ok(Author {
//!             name: args.take("name")?,
//!             countries: args.take_list("countries")?,
//!         })
//!     }
//! }
//!
//! let author: Author =
//!     jsonseed::deserialize(r#"{"name": "J. Heller", "publishedCountry": ["Korea", "US"]}"#)?;
//! assert_eq!(author.name, "J. Heller");
//! assert_eq!(author.countries, vec!["Korea", "US"]);
//! # Ok::<(), jsonseed::DeserializeError>(())
//! ```

use std::io::Read;

// Core types
pub mod core;

pub use core::{
    DeserializeError, ErrorCategory, JsonNumber, JsonScalar, Native, Primitive, PrimitiveType,
    Result,
};

// Tokenizer and parser
pub mod json;

pub use json::{check_syntax, JsonObject, Position, Token, TokenKind};

// Scalar codecs
pub mod encoding;

// Type metadata
pub mod schema;

pub use schema::{
    Arguments, CacheBuilder, Descriptor, DescriptorBuilder, DescriptorCache, FromJson,
    ObjectType, ParamBuilder, Parameter, Substitution, TypeKey, TypeRef,
};

// Incremental construction
pub mod seed;

use json::{tokenize, Parser};
use seed::{ObjectSeed, Seed};

/// Deserialize `source` into a `T` using a fresh descriptor cache.
pub fn deserialize<T: FromJson>(source: &str) -> Result<T> {
    deserialize_with(&DescriptorCache::new(), source)
}

/// Deserialize `source` into a `T` using a shared descriptor cache.
pub fn deserialize_with<T: FromJson>(cache: &DescriptorCache, source: &str) -> Result<T> {
    let object = ObjectType::of::<T>();
    deserialize_object(cache, source, &object)?
        .downcast::<T>()
        .map_err(|other| {
            DeserializeError::Other(format!(
                "Constructor of {} produced {}",
                object.key(),
                other.kind()
            ))
        })
}

/// Read all of `reader` and deserialize it into a `T`.
pub fn deserialize_reader<T: FromJson, R: Read>(cache: &DescriptorCache, mut reader: R) -> Result<T> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    deserialize_with(cache, &source)
}

/// Deserialize `source` into an object type chosen at runtime.
///
/// The result is the type-erased constructed value.
pub fn deserialize_object(
    cache: &DescriptorCache,
    source: &str,
    object: &ObjectType,
) -> Result<Native> {
    let descriptor = cache.descriptor_for(object)?;
    let mut root = Box::new(ObjectSeed::root(cache, descriptor));
    Parser::new(tokenize(source)).parse(root.as_object())?;
    root.spawn()
}
