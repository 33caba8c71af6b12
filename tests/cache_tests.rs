// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Descriptor cache integration tests.
//!
//! Tests cover:
//! - Memoization of descriptors across calls
//! - Concurrent deserialization sharing one cache
//! - Configuration errors reported when a descriptor is built

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use common::*;
use jsonseed::encoding::IntegerCodec;
use jsonseed::{
    deserialize_object, deserialize_with, Arguments, DescriptorBuilder, DescriptorCache,
    DeserializeError, ErrorCategory, FromJson, ObjectType, PrimitiveType, Result, TypeKey,
};

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

/// Counts how many times its descriptor is built.
#[derive(Debug)]
struct Counted {
    value: i32,
}

impl FromJson for Counted {
    fn describe(d: &mut DescriptorBuilder) {
        COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
        d.value::<i32>("value");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Counted {
            value: args.take("value")?,
        })
    }
}

#[derive(Debug)]
struct Clash;

impl FromJson for Clash {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("first").json_name("name");
        d.value::<String>("second").json_name("name");
    }

    fn construct(_args: &mut Arguments) -> Result<Self> {
        Ok(Clash)
    }
}

#[derive(Debug)]
struct DatedString;

impl FromJson for DatedString {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("when").date_format("%Y-%m-%d");
    }

    fn construct(_args: &mut Arguments) -> Result<Self> {
        Ok(DatedString)
    }
}

#[derive(Debug)]
struct WrongCodec;

impl FromJson for WrongCodec {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("count").codec(IntegerCodec::<i32>::new());
    }

    fn construct(_args: &mut Arguments) -> Result<Self> {
        Ok(WrongCodec)
    }
}

#[test]
fn test_descriptor_is_memoized() {
    let cache = DescriptorCache::new();
    let first = cache.get::<Book>().unwrap();
    let second = cache.get::<Book>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let names: Vec<_> = first.parameters().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["title", "publisher", "author"]);
    assert!(!cache.contains::<Author>());
}

#[test]
fn test_nested_descriptors_built_on_demand() {
    let cache = DescriptorCache::new();
    let _: Book = deserialize_with(&cache, BOOK_JSON).unwrap();
    assert!(cache.contains::<Book>());
    assert!(cache.contains::<Author>());
    assert!(cache.contains_key(TypeKey::of::<BirthOfDate>()));

    let author = cache.get::<Author>().unwrap();
    let (index, parameter) = author.lookup("nameOfAuthor").unwrap();
    assert_eq!(index, 0);
    assert_eq!(parameter.name(), "name");
    assert!(author.find("name").is_none());
    let (_, parameter) = author.lookup("publishedCountry").unwrap();
    assert_eq!(parameter.name(), "published_country");
}

#[test]
fn test_hit_and_miss_construct_the_same() {
    let cache = DescriptorCache::new();
    let cold: Book = deserialize_with(&cache, BOOK_JSON).unwrap();
    let warm: Book = deserialize_with(&cache, BOOK_JSON).unwrap();
    assert_eq!(cold, warm);
}

#[test]
fn test_concurrent_builds_once() {
    let cache = DescriptorCache::new();
    let sum = AtomicUsize::new(0);

    thread::scope(|scope| {
        for i in 0..8 {
            let cache = &cache;
            let sum = &sum;
            scope.spawn(move || {
                let json = format!(r#"{{"value": {i}}}"#);
                let counted: Counted = deserialize_with(cache, &json).unwrap();
                sum.fetch_add(counted.value as usize, Ordering::SeqCst);
            });
        }
    });

    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
    assert_eq!(sum.load(Ordering::SeqCst), (0..8).sum::<usize>());
}

#[test]
fn test_runtime_object_type() {
    let cache = DescriptorCache::new();
    let native = deserialize_object(&cache, BOOK_JSON, &ObjectType::of::<Book>()).unwrap();
    let book = native.downcast::<Book>().unwrap();
    assert_eq!(book.author.name, "J. Heller");

    let err = deserialize_object(&cache, "{}", &ObjectType::opaque::<Marker>()).unwrap_err();
    assert!(matches!(err, DeserializeError::MissingConstructor { .. }));
}

#[test]
fn test_duplicate_json_name_rejected() {
    let cache = DescriptorCache::new();
    let err = cache.get::<Clash>().unwrap_err();
    assert!(matches!(err, DeserializeError::InvalidDirective { .. }));
    assert_eq!(err.category(), ErrorCategory::TypeResolution);
    assert!(!cache.contains::<Clash>());
}

#[test]
fn test_date_format_on_non_date_rejected() {
    let err = DescriptorCache::new().get::<DatedString>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid directive on DatedString.when: date format on non-date type String"
    );
}

#[test]
fn test_mismatched_codec_rejected() {
    let err = DescriptorCache::new().get::<WrongCodec>().unwrap_err();
    assert!(matches!(err, DeserializeError::InvalidDirective { .. }));

    let err = DescriptorCache::builder()
        .codec(PrimitiveType::String, IntegerCodec::<i32>::new())
        .build()
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Value);
}
