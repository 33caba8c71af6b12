// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common fixture types for integration tests.

#![allow(dead_code)]

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use jsonseed::encoding::ValueCodec;
use jsonseed::{
    Arguments, DescriptorBuilder, DeserializeError, FromJson, JsonScalar, Result, Substitution,
};

// ============================================================================
// Book / Author
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub title: String,
    pub publisher: String,
    pub author: Author,
}

impl FromJson for Book {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("title");
        d.value::<String>("publisher");
        d.object::<Author>("author");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Book {
            title: args.take("title")?,
            publisher: args.take("publisher")?,
            author: args.take("author")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "nameOfAuthor")]
    pub name: String,
    pub published_country: Vec<String>,
    pub birth_of_date: BirthOfDate,
}

impl FromJson for Author {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("name").json_name("nameOfAuthor");
        d.values::<String>("published_country")
            .json_name("publishedCountry");
        d.object::<BirthOfDate>("birth_of_date")
            .json_name("birthOfDate");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Author {
            name: args.take("name")?,
            published_country: args.take_list("published_country")?,
            birth_of_date: args.take("birth_of_date")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthOfDate {
    pub year: String,
    pub month: String,
}

impl FromJson for BirthOfDate {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("year");
        d.value::<String>("month");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(BirthOfDate {
            year: args.take("year")?,
            month: args.take("month")?,
        })
    }
}

pub const BOOK_JSON: &str = r#"{"title":"Catch-22","publisher":"Acon","author":{"nameOfAuthor":"J. Heller","publishedCountry":["Korea","US"],"birthOfDate":{"month":"4","year":"1998"}}}"#;

/// Two nested objects, for checking the order children are finished in.
#[derive(Debug, Clone, PartialEq)]
pub struct Lifespan {
    pub born: BirthOfDate,
    pub died: BirthOfDate,
}

impl FromJson for Lifespan {
    fn describe(d: &mut DescriptorBuilder) {
        d.object::<BirthOfDate>("born").json_name("a");
        d.object::<BirthOfDate>("died").json_name("b");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Lifespan {
            born: args.take("born")?,
            died: args.take("died")?,
        })
    }
}

// ============================================================================
// Library: every primitive, nullable, optional and nested lists
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Library {
    pub name: String,
    pub open: bool,
    pub floors: u8,
    pub founded: i16,
    pub visitors: i32,
    pub budget: i64,
    pub capacity: u16,
    pub volumes: u32,
    pub catalog_id: u64,
    pub rating: f32,
    pub area: f64,
    pub offset: i8,
    pub motto: Option<String>,
    pub books: Vec<Book>,
    pub shelves: Vec<Vec<u32>>,
    pub tags: Vec<String>,
}

impl FromJson for Library {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("name");
        d.value::<bool>("open");
        d.value::<u8>("floors");
        d.value::<i16>("founded");
        d.value::<i32>("visitors");
        d.value::<i64>("budget");
        d.value::<u16>("capacity");
        d.value::<u32>("volumes");
        d.value::<u64>("catalog_id");
        d.value::<f32>("rating");
        d.value::<f64>("area");
        d.value::<i8>("offset");
        d.value::<String>("motto").nullable();
        d.objects::<Book>("books");
        d.param(
            "shelves",
            jsonseed::TypeRef::list(jsonseed::TypeRef::list(jsonseed::TypeRef::primitive::<u32>())),
        );
        d.values::<String>("tags").optional();
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Library {
            name: args.take("name")?,
            open: args.take("open")?,
            floors: args.take("floors")?,
            founded: args.take("founded")?,
            visitors: args.take("visitors")?,
            budget: args.take("budget")?,
            capacity: args.take("capacity")?,
            volumes: args.take("volumes")?,
            catalog_id: args.take("catalog_id")?,
            rating: args.take("rating")?,
            area: args.take("area")?,
            offset: args.take("offset")?,
            motto: args.take_optional("motto")?,
            books: args.take_list("books")?,
            shelves: args.take_nested_list("shelves")?,
            tags: args.take_list_or_else("tags", Vec::new)?,
        })
    }
}

// ============================================================================
// Shapes: polymorphic substitution
// ============================================================================

pub trait Shape: Send + fmt::Debug {
    fn area(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    pub side: f64,
}

impl Shape for Square {
    fn area(&self) -> f64 {
        self.side * self.side
    }
}

impl FromJson for Square {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<f64>("side");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Square {
            side: args.take("side")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

impl FromJson for Circle {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<f64>("radius");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Circle {
            radius: args.take("radius")?,
        })
    }
}

pub fn boxed_square(square: Square) -> Box<dyn Shape> {
    Box::new(square)
}

pub fn boxed_circle(circle: Circle) -> Box<dyn Shape> {
    Box::new(circle)
}

/// Shapes declared abstractly, with per-parameter substitutions.
#[derive(Debug)]
pub struct Drawing {
    pub title: String,
    pub frame: Box<dyn Shape>,
    pub shapes: Vec<Box<dyn Shape>>,
}

impl FromJson for Drawing {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("title");
        d.opaque::<Box<dyn Shape>>("frame")
            .deserialize_as(Substitution::of::<Square, Box<dyn Shape>>(boxed_square));
        d.opaques::<Box<dyn Shape>>("shapes")
            .deserialize_as(Substitution::of::<Circle, Box<dyn Shape>>(boxed_circle));
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Drawing {
            title: args.take("title")?,
            frame: args.take("frame")?,
            shapes: args.take_list("shapes")?,
        })
    }
}

/// Shapes resolved through a cache-level substitution.
#[derive(Debug)]
pub struct Gallery {
    pub pieces: Vec<Box<dyn Shape>>,
}

impl FromJson for Gallery {
    fn describe(d: &mut DescriptorBuilder) {
        d.opaques::<Box<dyn Shape>>("pieces");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Gallery {
            pieces: args.take_list("pieces")?,
        })
    }
}

// ============================================================================
// Dates and custom codecs
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub day: NaiveDate,
    pub starts_at: NaiveDateTime,
    pub holidays: Vec<NaiveDate>,
}

impl FromJson for Event {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("name");
        d.opaque::<NaiveDate>("day").date_format("%d.%m.%Y");
        d.opaque::<NaiveDateTime>("starts_at")
            .json_name("startsAt")
            .date_format("%Y-%m-%dT%H:%M:%S");
        d.opaques::<NaiveDate>("holidays")
            .date_format("%Y-%m-%d")
            .optional();
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Event {
            name: args.take("name")?,
            day: args.take("day")?,
            starts_at: args.take("starts_at")?,
            holidays: args.take_list_or_else("holidays", Vec::new)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

/// Reads temperatures written as `"21.5C"`.
pub struct CelsiusCodec;

impl ValueCodec for CelsiusCodec {
    type Value = Celsius;

    fn from_json(&self, value: &JsonScalar) -> Result<Celsius> {
        value
            .as_str()
            .and_then(|s| s.strip_suffix('C'))
            .and_then(|s| s.parse().ok())
            .map(Celsius)
            .ok_or_else(|| DeserializeError::invalid_value("temperature", value.to_string()))
    }

    fn to_json(&self, value: &Celsius) -> Result<JsonScalar> {
        Ok(JsonScalar::String(format!("{}C", value.0)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub station: String,
    pub temperature: Celsius,
    pub history: Vec<Celsius>,
}

impl FromJson for Reading {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("station");
        d.opaque::<Celsius>("temperature").codec(CelsiusCodec);
        d.opaques::<Celsius>("history").codec(CelsiusCodec);
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Reading {
            station: args.take("station")?,
            temperature: args.take("temperature")?,
            history: args.take_list("history")?,
        })
    }
}

/// Booleans written as `"yes"` / `"no"`.
pub struct YesNoCodec;

impl ValueCodec for YesNoCodec {
    type Value = bool;

    fn from_json(&self, value: &JsonScalar) -> Result<bool> {
        match value.as_str() {
            Some("yes") => Ok(true),
            Some("no") => Ok(false),
            _ => Err(DeserializeError::invalid_value("yes or no", value.to_string())),
        }
    }

    fn to_json(&self, value: &bool) -> Result<JsonScalar> {
        Ok(JsonScalar::String(if *value { "yes" } else { "no" }.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub on: bool,
}

impl FromJson for Switch {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<bool>("on");
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Switch {
            on: args.take("on")?,
        })
    }
}

// ============================================================================
// Unbound parameters, raw scalars, opaque types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: u64,
    pub session: Option<String>,
}

impl FromJson for Account {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<u64>("id");
        d.unbound("session", jsonseed::TypeRef::primitive::<String>())
            .nullable();
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Account {
            id: args.take("id")?,
            session: args.take_optional("session")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: u64,
    pub owner: String,
}

impl FromJson for Ticket {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<u64>("id");
        d.unbound("owner", jsonseed::TypeRef::primitive::<String>());
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Ticket {
            id: args.take("id")?,
            owner: args.take("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: JsonScalar,
    pub history: Vec<JsonScalar>,
}

impl FromJson for Setting {
    fn describe(d: &mut DescriptorBuilder) {
        d.value::<String>("key");
        d.scalar("value").nullable();
        d.param("history", jsonseed::TypeRef::list(jsonseed::TypeRef::Scalar))
            .optional();
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Setting {
            key: args.take("key")?,
            value: args.take_optional("value")?.unwrap_or(JsonScalar::Null),
            history: args.take_list_or_else("history", Vec::new)?,
        })
    }
}

pub struct Marker;

pub struct Holder {
    pub marker: Option<Marker>,
}

impl FromJson for Holder {
    fn describe(d: &mut DescriptorBuilder) {
        d.opaque::<Marker>("marker").optional();
    }

    fn construct(args: &mut Arguments) -> Result<Self> {
        Ok(Holder {
            marker: args.take_optional("marker")?,
        })
    }
}
