// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Constructor registration and argument passing.
//!
//! A type becomes a deserialization target by implementing [`FromJson`]:
//! `describe` declares the constructor parameters once, `construct` is
//! called for every object with the values collected for them.

use std::any::{type_name, Any};
use std::collections::HashMap;

use super::descriptor::DescriptorBuilder;
use super::types::short_type_name;
use crate::core::{DeserializeError, Native, Result};

/// A type that can be built from a JSON object.
///
/// # Example
///
/// ```
/// use jsonseed::{Arguments, DescriptorBuilder, FromJson, Result};
///
/// struct Person {
///     name: String,
///     age: i32,
///     nickname: Option<String>,
/// }
///
/// impl FromJson for Person {
///     fn describe(d: &mut DescriptorBuilder) {
///         d.value::<String>("name");
///         d.value::<i32>("age").optional();
///         d.value::<String>("nickname").json_name("nick").nullable();
///     }
///
///     fn construct(args: &mut Arguments) -> Result<Self> {
///         Ok(Person {
///             name: args.take("name")?,
///             age: args.take_or_else("age", || 18)?,
///             nickname: args.take_optional("nickname")?,
///         })
///     }
/// }
///
/// let person: Person = jsonseed::deserialize(r#"{"name": "Alice", "nick": null}"#).unwrap();
/// assert_eq!(person.name, "Alice");
/// assert_eq!(person.age, 18);
/// assert!(person.nickname.is_none());
/// ```
pub trait FromJson: Sized + Send + 'static {
    /// Declare the constructor parameters and their directives.
    fn describe(d: &mut DescriptorBuilder);

    /// Build a value from the collected arguments.
    fn construct(args: &mut Arguments) -> Result<Self>;
}

/// Type-erased constructor call.
pub(crate) type ConstructFn = fn(&mut Arguments) -> Result<Native>;

pub(crate) fn construct_erased<T: FromJson>(args: &mut Arguments) -> Result<Native> {
    T::construct(args).map(Native::value)
}

/// Values collected for one constructor call, keyed by declared parameter name.
///
/// Each `take*` method removes the value it returns.
#[derive(Debug)]
pub struct Arguments {
    type_name: String,
    values: HashMap<String, Native>,
}

impl Arguments {
    pub(crate) fn new(type_name: impl Into<String>, values: HashMap<String, Native>) -> Self {
        Self {
            type_name: type_name.into(),
            values,
        }
    }

    /// Name of the type being constructed.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Check if a value (possibly null) was supplied for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of values not yet taken.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if every value has been taken.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the raw value for `name`.
    pub fn take_native(&mut self, name: &str) -> Option<Native> {
        self.values.remove(name)
    }

    /// Take a required value.
    ///
    /// # Errors
    ///
    /// `MissingValue` if absent, `NullValue` if null, `TypeMismatch` if the
    /// value is not a `T`.
    pub fn take<T: Any>(&mut self, name: &str) -> Result<T> {
        match self.values.remove(name) {
            None => Err(DeserializeError::missing_value(name)),
            Some(native) => downcast_value(name, native),
        }
    }

    /// Take a nullable value; absent and null both give `None`.
    pub fn take_optional<T: Any>(&mut self, name: &str) -> Result<Option<T>> {
        match self.values.remove(name) {
            None | Some(Native::Null) => Ok(None),
            Some(native) => downcast_value(name, native).map(Some),
        }
    }

    /// Take a value, falling back to `default` when it is absent.
    pub fn take_or_else<T: Any>(&mut self, name: &str, default: impl FnOnce() -> T) -> Result<T> {
        match self.values.remove(name) {
            None => Ok(default()),
            Some(native) => downcast_value(name, native),
        }
    }

    /// Take a required list of `T`.
    pub fn take_list<T: Any>(&mut self, name: &str) -> Result<Vec<T>> {
        match self.values.remove(name) {
            None => Err(DeserializeError::missing_value(name)),
            Some(native) => downcast_list(name, native),
        }
    }

    /// Take a list of `T`, falling back to `default` when it is absent.
    pub fn take_list_or_else<T: Any>(
        &mut self,
        name: &str,
        default: impl FnOnce() -> Vec<T>,
    ) -> Result<Vec<T>> {
        match self.values.remove(name) {
            None => Ok(default()),
            Some(native) => downcast_list(name, native),
        }
    }

    /// Take a nullable list of `T`; absent and null both give `None`.
    pub fn take_optional_list<T: Any>(&mut self, name: &str) -> Result<Option<Vec<T>>> {
        match self.values.remove(name) {
            None | Some(Native::Null) => Ok(None),
            Some(native) => downcast_list(name, native).map(Some),
        }
    }

    /// Take a required list of lists of `T`.
    pub fn take_nested_list<T: Any>(&mut self, name: &str) -> Result<Vec<Vec<T>>> {
        let outer = match self.values.remove(name) {
            None => return Err(DeserializeError::missing_value(name)),
            Some(Native::Null) => return Err(DeserializeError::null_value(name)),
            Some(native) => native
                .into_items()
                .map_err(|other| mismatch::<Vec<Vec<T>>>(name, &other))?,
        };
        outer
            .into_iter()
            .map(|inner| downcast_list(name, inner))
            .collect()
    }
}

fn mismatch<T>(name: &str, found: &Native) -> DeserializeError {
    DeserializeError::type_mismatch(name, short_type_name(type_name::<T>()), found.kind())
}

fn downcast_value<T: Any>(name: &str, native: Native) -> Result<T> {
    match native {
        Native::Null => Err(DeserializeError::null_value(name)),
        native => native
            .downcast::<T>()
            .map_err(|other| mismatch::<T>(name, &other)),
    }
}

fn downcast_list<T: Any>(name: &str, native: Native) -> Result<Vec<T>> {
    match native {
        Native::Null => Err(DeserializeError::null_value(name)),
        native => native
            .into_vec::<T>()
            .map_err(|other| mismatch::<Vec<T>>(name, &other)),
    }
}
