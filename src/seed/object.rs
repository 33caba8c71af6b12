// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Seed for a single object.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{seed_for, Seed};
use crate::core::{DeserializeError, JsonScalar, Native, Result};
use crate::json::JsonObject;
use crate::schema::types::UpcastFn;
use crate::schema::{Descriptor, DescriptorCache};

/// Collects constructor arguments for one object.
///
/// Scalars are decoded as they arrive; nested objects and arrays get child
/// seeds that are spawned when this seed is, in parameter declaration
/// order. A key seen twice keeps the later value.
pub struct ObjectSeed<'c> {
    cache: &'c DescriptorCache,
    descriptor: Arc<Descriptor>,
    upcast: Option<UpcastFn>,
    values: BTreeMap<usize, Native>,
    seeds: BTreeMap<usize, Box<dyn Seed + 'c>>,
}

impl<'c> ObjectSeed<'c> {
    /// Create a seed for the type described by `descriptor`.
    pub(crate) fn new(
        cache: &'c DescriptorCache,
        descriptor: Arc<Descriptor>,
        upcast: Option<UpcastFn>,
    ) -> Self {
        Self {
            cache,
            descriptor,
            upcast,
            values: BTreeMap::new(),
            seeds: BTreeMap::new(),
        }
    }

    /// Seed for the root object of a document.
    pub fn root(cache: &'c DescriptorCache, descriptor: Arc<Descriptor>) -> Self {
        Self::new(cache, descriptor, None)
    }

    fn begin_child(&mut self, name: &str, is_list: bool) -> Result<&mut dyn JsonObject> {
        let (index, parameter) = self.descriptor.lookup(name)?;
        let seed = seed_for(
            self.cache,
            parameter.type_ref(),
            parameter.codec(),
            parameter.upcast(),
            is_list,
        )?;
        self.values.remove(&index);
        self.seeds.remove(&index);
        Ok(self.seeds.entry(index).or_insert(seed).as_object())
    }
}

impl JsonObject for ObjectSeed<'_> {
    fn set_scalar(&mut self, name: &str, value: JsonScalar) -> Result<()> {
        let (index, parameter) = self.descriptor.lookup(name)?;

        let native = if value.is_null() {
            if !parameter.is_nullable() {
                return Err(DeserializeError::null_value(parameter.name()));
            }
            Native::Null
        } else if parameter.type_ref().is_list() {
            return Err(DeserializeError::ArrayExpected {
                type_name: parameter.type_ref().name(),
                found: value.to_string(),
            });
        } else {
            match parameter.codec() {
                Some(codec) => codec.decode(&value)?,
                None => {
                    return Err(DeserializeError::type_mismatch(
                        parameter.name(),
                        parameter.type_ref().name(),
                        value.type_name(),
                    ))
                }
            }
        };

        self.seeds.remove(&index);
        self.values.insert(index, native);
        Ok(())
    }

    fn begin_object(&mut self, name: &str) -> Result<&mut dyn JsonObject> {
        self.begin_child(name, false)
    }

    fn begin_array(&mut self, name: &str) -> Result<&mut dyn JsonObject> {
        self.begin_child(name, true)
    }
}

impl Seed for ObjectSeed<'_> {
    fn as_object(&mut self) -> &mut dyn JsonObject {
        self
    }

    fn spawn(self: Box<Self>) -> Result<Native> {
        let ObjectSeed {
            descriptor,
            upcast,
            mut values,
            seeds,
            ..
        } = *self;
        for (index, seed) in seeds {
            values.insert(index, seed.spawn()?);
        }
        let native = descriptor.instantiate(values)?;
        match upcast {
            Some(upcast) => upcast(native),
            None => Ok(native),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JsonNumber;
    use crate::schema::{Arguments, DescriptorBuilder, FromJson};

    struct Page {
        number: u32,
        note: Option<String>,
        lines: Vec<String>,
    }

    impl FromJson for Page {
        fn describe(d: &mut DescriptorBuilder) {
            d.value::<u32>("number");
            d.value::<String>("note").nullable();
            d.values::<String>("lines").optional();
        }

        fn construct(args: &mut Arguments) -> Result<Self> {
            Ok(Page {
                number: args.take("number")?,
                note: args.take_optional("note")?,
                lines: args.take_list_or_else("lines", Vec::new)?,
            })
        }
    }

    fn page_seed(cache: &DescriptorCache) -> Box<ObjectSeed<'_>> {
        Box::new(ObjectSeed::root(cache, cache.get::<Page>().unwrap()))
    }

    fn spawn_page(seed: Box<ObjectSeed<'_>>) -> Result<Page> {
        seed.spawn()?
            .downcast::<Page>()
            .map_err(|_| DeserializeError::Other("not a page".into()))
    }

    #[test]
    fn test_scalars_and_defaults() {
        let cache = DescriptorCache::new();
        let mut seed = page_seed(&cache);
        seed.set_scalar("number", JsonScalar::Number(JsonNumber::Int(7)))
            .unwrap();
        let page = spawn_page(seed).unwrap();
        assert_eq!(page.number, 7);
        assert!(page.note.is_none());
        assert!(page.lines.is_empty());
    }

    #[test]
    fn test_null_handling() {
        let cache = DescriptorCache::new();
        let mut seed = page_seed(&cache);
        seed.set_scalar("note", JsonScalar::Null).unwrap();
        let err = seed.set_scalar("number", JsonScalar::Null).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Received null value for non-null parameter number"
        );
    }

    #[test]
    fn test_missing_required() {
        let cache = DescriptorCache::new();
        let err = spawn_page(page_seed(&cache)).err().unwrap();
        assert_eq!(err.to_string(), "Missing value for parameter number");
    }

    #[test]
    fn test_unknown_key() {
        let cache = DescriptorCache::new();
        let mut seed = page_seed(&cache);
        let err = seed
            .set_scalar("footer", JsonScalar::Bool(true))
            .unwrap_err();
        assert!(matches!(err, DeserializeError::UnknownParameter { .. }));
    }

    #[test]
    fn test_scalar_for_list() {
        let cache = DescriptorCache::new();
        let mut seed = page_seed(&cache);
        let err = seed
            .set_scalar("lines", JsonScalar::String("one".into()))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "An array expected for Vec<String>, found \"one\""
        );
    }

    #[test]
    fn test_later_key_wins() {
        let cache = DescriptorCache::new();
        let mut seed = page_seed(&cache);
        seed.set_scalar("number", JsonScalar::Number(JsonNumber::Int(1)))
            .unwrap();
        seed.set_scalar("number", JsonScalar::Number(JsonNumber::Int(2)))
            .unwrap();
        {
            let lines = seed.begin_array("lines").unwrap();
            lines
                .set_scalar("lines", JsonScalar::String("a".into()))
                .unwrap();
        }
        {
            let lines = seed.begin_array("lines").unwrap();
            lines
                .set_scalar("lines", JsonScalar::String("b".into()))
                .unwrap();
        }
        let page = spawn_page(seed).unwrap();
        assert_eq!(page.number, 2);
        assert_eq!(page.lines, vec!["b"]);
    }

    #[test]
    fn test_object_for_primitive() {
        let cache = DescriptorCache::new();
        let mut seed = page_seed(&cache);
        let err = seed.begin_object("number").err().unwrap();
        assert!(matches!(err, DeserializeError::ScalarExpected { .. }));
    }
}
