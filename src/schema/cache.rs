// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Memoizing descriptor cache.
//!
//! Descriptors are built on first use and never change afterwards. Lookups
//! take a shared lock; a miss takes a build lock scoped to the one type
//! being built, so unrelated types build concurrently and each type is
//! built once.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use super::constructor::FromJson;
use super::descriptor::{Descriptor, DescriptorBuilder};
use super::types::{ObjectType, Substitution, TypeKey};
use crate::core::{DeserializeError, PrimitiveType, Result};
use crate::encoding::{CodecRegistry, DynValueCodec};

fn poisoned<E: fmt::Display>(e: E) -> DeserializeError {
    DeserializeError::Other(format!("Descriptor cache lock poisoned: {e}"))
}

/// Thread-safe cache of type descriptors.
///
/// # Example
///
/// ```
/// use jsonseed::{Arguments, DescriptorBuilder, DescriptorCache, FromJson, Result};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl FromJson for Point {
///     fn describe(d: &mut DescriptorBuilder) {
///         d.value::<i32>("x");
///         d.value::<i32>("y");
///     }
///
///     fn construct(args: &mut Arguments) -> Result<Self> {
///         Ok(Point { x: args.take("x")?, y: args.take("y")? })
///     }
/// }
///
/// let cache = DescriptorCache::new();
/// let p: Point = jsonseed::deserialize_with(&cache, r#"{"x": 1, "y": 2}"#).unwrap();
/// assert_eq!((p.x, p.y), (1, 2));
/// assert!(cache.contains::<Point>());
/// ```
pub struct DescriptorCache {
    descriptors: RwLock<HashMap<TypeId, Arc<Descriptor>>>,
    build_locks: Mutex<HashMap<TypeId, Arc<Mutex<()>>>>,
    codecs: CodecRegistry,
    substitutions: HashMap<TypeKey, Substitution>,
}

impl DescriptorCache {
    /// Create an empty cache with the default codecs.
    pub fn new() -> Self {
        Self::with_parts(CodecRegistry::new(), HashMap::new())
    }

    /// Start configuring a cache.
    pub fn builder() -> CacheBuilder {
        CacheBuilder::new()
    }

    fn with_parts(codecs: CodecRegistry, substitutions: HashMap<TypeKey, Substitution>) -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
            build_locks: Mutex::new(HashMap::new()),
            codecs,
            substitutions,
        }
    }

    /// Descriptor of `T`, built on first use.
    pub fn get<T: FromJson>(&self) -> Result<Arc<Descriptor>> {
        self.descriptor_for(&ObjectType::of::<T>())
    }

    /// Descriptor of an object type, built on first use.
    ///
    /// # Errors
    ///
    /// `MissingConstructor` for an opaque type, or whatever resolving the
    /// declared parameters raises. Failed builds are not cached.
    pub fn descriptor_for(&self, object: &ObjectType) -> Result<Arc<Descriptor>> {
        let id = object.key().id();
        if let Some(found) = self.lookup(id)? {
            return Ok(found);
        }

        let constructor = object
            .constructor()
            .ok_or_else(|| DeserializeError::missing_constructor(object.key().name()))?;

        let build_lock = {
            let mut locks = self.build_locks.lock().map_err(poisoned)?;
            Arc::clone(locks.entry(id).or_default())
        };
        let _guard = build_lock.lock().map_err(poisoned)?;

        // Another thread may have finished while we waited.
        if let Some(found) = self.lookup(id)? {
            return Ok(found);
        }

        let mut builder = DescriptorBuilder::new(object.key());
        (constructor.describe)(&mut builder);
        let descriptor = Arc::new(builder.build(
            constructor.construct,
            &self.codecs,
            &self.substitutions,
        )?);
        debug!(
            type_name = %descriptor.type_name(),
            parameters = descriptor.len(),
            "built descriptor"
        );

        self.descriptors
            .write()
            .map_err(poisoned)?
            .insert(id, Arc::clone(&descriptor));
        Ok(descriptor)
    }

    fn lookup(&self, id: TypeId) -> Result<Option<Arc<Descriptor>>> {
        let descriptors = self.descriptors.read().map_err(poisoned)?;
        Ok(descriptors.get(&id).cloned())
    }

    /// Check if the descriptor of `T` has been built.
    pub fn contains<T: 'static>(&self) -> bool {
        self.contains_key(TypeKey::of::<T>())
    }

    /// Check if the descriptor of the keyed type has been built.
    pub fn contains_key(&self, key: TypeKey) -> bool {
        self.descriptors
            .read()
            .map(|d| d.contains_key(&key.id()))
            .unwrap_or(false)
    }

    /// Number of built descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Check if no descriptor has been built.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Codec registry used for primitive parameters.
    pub fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    /// Registered cache-level substitution for an abstract type.
    pub fn substitution(&self, target: TypeKey) -> Option<&Substitution> {
        self.substitutions.get(&target)
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("descriptors", &self.len())
            .field("codecs", &self.codecs)
            .field("substitutions", &self.substitutions.len())
            .finish()
    }
}

/// Builder for a configured [`DescriptorCache`].
///
/// # Example
///
/// ```
/// use jsonseed::encoding::IntegerCodec;
/// use jsonseed::{DescriptorCache, PrimitiveType};
///
/// let cache = DescriptorCache::builder()
///     .codec(PrimitiveType::Int64, IntegerCodec::<i64>::new())
///     .build()
///     .unwrap();
/// assert!(cache.is_empty());
/// ```
pub struct CacheBuilder {
    codecs: Vec<(PrimitiveType, Arc<dyn DynValueCodec>)>,
    substitutions: Vec<Substitution>,
}

impl CacheBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            codecs: Vec::new(),
            substitutions: Vec::new(),
        }
    }

    /// Replace the default codec for a primitive type.
    pub fn codec<C: DynValueCodec + 'static>(mut self, primitive: PrimitiveType, codec: C) -> Self {
        self.codecs.push((primitive, Arc::new(codec)));
        self
    }

    /// Construct the substitution's concrete type wherever its target type
    /// is declared and no per-parameter substitution applies.
    pub fn substitute(mut self, substitution: Substitution) -> Self {
        self.substitutions.push(substitution);
        self
    }

    /// Build the cache.
    ///
    /// # Errors
    ///
    /// `InvalidValue` if a codec does not produce its primitive's native
    /// type.
    pub fn build(self) -> Result<DescriptorCache> {
        let mut registry = CodecRegistry::new();
        for (primitive, codec) in self.codecs {
            registry.register_arc(primitive, codec)?;
        }
        let substitutions = self
            .substitutions
            .into_iter()
            .map(|sub| (sub.target(), sub))
            .collect();
        Ok(DescriptorCache::with_parts(registry, substitutions))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
