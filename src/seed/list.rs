// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! List seeds.

use std::sync::Arc;

use super::{seed_for, Seed};
use crate::core::{DeserializeError, JsonScalar, Native, Result};
use crate::encoding::DynValueCodec;
use crate::json::JsonObject;
use crate::schema::types::UpcastFn;
use crate::schema::{DescriptorCache, TypeRef};

/// List whose elements are objects or nested lists.
///
/// Each element gets its own child seed, spawned in encounter order.
pub struct ObjectListSeed<'c> {
    cache: &'c DescriptorCache,
    element: TypeRef,
    codec: Option<Arc<dyn DynValueCodec>>,
    upcast: Option<UpcastFn>,
    elements: Vec<Box<dyn Seed + 'c>>,
}

impl<'c> ObjectListSeed<'c> {
    pub(crate) fn new(
        cache: &'c DescriptorCache,
        element: TypeRef,
        codec: Option<Arc<dyn DynValueCodec>>,
        upcast: Option<UpcastFn>,
    ) -> Self {
        Self {
            cache,
            element,
            codec,
            upcast,
            elements: Vec::new(),
        }
    }

    fn push(&mut self, is_list: bool) -> Result<&mut dyn JsonObject> {
        let seed = seed_for(
            self.cache,
            &self.element,
            self.codec.as_ref(),
            self.upcast.as_ref(),
            is_list,
        )?;
        self.elements.push(seed);
        match self.elements.last_mut() {
            Some(seed) => Ok(seed.as_object()),
            None => Err(DeserializeError::Other("element seed vanished".to_string())),
        }
    }
}

impl JsonObject for ObjectListSeed<'_> {
    fn set_scalar(&mut self, _name: &str, _value: JsonScalar) -> Result<()> {
        Err(DeserializeError::PrimitiveInObjectCollection {
            element_type: self.element.name(),
        })
    }

    fn begin_object(&mut self, _name: &str) -> Result<&mut dyn JsonObject> {
        self.push(false)
    }

    fn begin_array(&mut self, _name: &str) -> Result<&mut dyn JsonObject> {
        self.push(true)
    }
}

impl Seed for ObjectListSeed<'_> {
    fn as_object(&mut self) -> &mut dyn JsonObject {
        self
    }

    fn spawn(self: Box<Self>) -> Result<Native> {
        self.elements
            .into_iter()
            .map(|seed| seed.spawn())
            .collect::<Result<Vec<_>>>()
            .map(Native::List)
    }
}

/// List of scalars decoded by one element codec.
pub struct ValueListSeed {
    element_type: String,
    codec: Arc<dyn DynValueCodec>,
    elements: Vec<Native>,
}

impl ValueListSeed {
    pub(crate) fn new(element_type: String, codec: Arc<dyn DynValueCodec>) -> Self {
        Self {
            element_type,
            codec,
            elements: Vec::new(),
        }
    }
}

impl JsonObject for ValueListSeed {
    fn set_scalar(&mut self, _name: &str, value: JsonScalar) -> Result<()> {
        let element = self.codec.decode(&value)?;
        self.elements.push(element);
        Ok(())
    }

    fn begin_object(&mut self, _name: &str) -> Result<&mut dyn JsonObject> {
        Err(DeserializeError::ObjectInPrimitiveCollection {
            element_type: self.element_type.clone(),
        })
    }

    fn begin_array(&mut self, _name: &str) -> Result<&mut dyn JsonObject> {
        Err(DeserializeError::ObjectInPrimitiveCollection {
            element_type: self.element_type.clone(),
        })
    }
}

impl Seed for ValueListSeed {
    fn as_object(&mut self) -> &mut dyn JsonObject {
        self
    }

    fn spawn(self: Box<Self>) -> Result<Native> {
        Ok(Native::List(self.elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JsonNumber;
    use crate::encoding::StringCodec;
    use crate::schema::{Arguments, DescriptorBuilder, FromJson};

    struct Tag {
        label: String,
    }

    impl FromJson for Tag {
        fn describe(d: &mut DescriptorBuilder) {
            d.value::<String>("label");
        }

        fn construct(args: &mut Arguments) -> Result<Self> {
            Ok(Tag {
                label: args.take("label")?,
            })
        }
    }

    #[test]
    fn test_value_list_decodes_in_order() {
        let mut seed = Box::new(ValueListSeed::new("String".into(), Arc::new(StringCodec)));
        seed.set_scalar("tags", JsonScalar::String("a".into())).unwrap();
        seed.set_scalar("tags", JsonScalar::String("b".into())).unwrap();
        let tags = seed.spawn().unwrap().into_vec::<String>().unwrap();
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn test_value_list_rejects_objects() {
        let mut seed = ValueListSeed::new("String".into(), Arc::new(StringCodec));
        let err = seed.begin_object("tags").err().unwrap();
        assert_eq!(
            err.to_string(),
            "Found object value in collection of primitive types (String)"
        );
        assert!(seed.begin_array("tags").is_err());
    }

    #[test]
    fn test_value_list_codec_error() {
        let mut seed = ValueListSeed::new("String".into(), Arc::new(StringCodec));
        let err = seed
            .set_scalar("tags", JsonScalar::Number(JsonNumber::Int(1)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected string, was: 1");
    }

    #[test]
    fn test_object_list_builds_each_element() {
        let cache = DescriptorCache::new();
        let mut seed = Box::new(ObjectListSeed::new(&cache, TypeRef::object::<Tag>(), None, None));
        for label in ["x", "y"] {
            let element = seed.begin_object("tags").unwrap();
            element
                .set_scalar("label", JsonScalar::String(label.into()))
                .unwrap();
        }
        let tags = seed.spawn().unwrap().into_vec::<Tag>().unwrap();
        let labels: Vec<_> = tags.into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["x", "y"]);
    }

    #[test]
    fn test_object_list_rejects_scalars() {
        let cache = DescriptorCache::new();
        let mut seed = ObjectListSeed::new(&cache, TypeRef::object::<Tag>(), None, None);
        let err = seed
            .set_scalar("tags", JsonScalar::String("x".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::PrimitiveInObjectCollection { .. }
        ));
        let err = seed.begin_array("tags").err().unwrap();
        assert!(matches!(err, DeserializeError::ObjectExpected { .. }));
    }
}
