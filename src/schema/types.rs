// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declared parameter types.
//!
//! A [`TypeRef`] is what a constructor parameter says it accepts. Object
//! types carry the constructor of the target type when it has one; types
//! without a constructor (dates, trait objects) are "opaque" and can only be
//! produced by a codec or a polymorphic [`Substitution`].

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::constructor::{construct_erased, ConstructFn, FromJson};
use super::descriptor::DescriptorBuilder;
use crate::core::{DeserializeError, JsonScalar, Native, Primitive, PrimitiveType, Result};

/// Type identity plus a readable name.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    full_name: &'static str,
}

impl TypeKey {
    /// Key of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            full_name: type_name::<T>(),
        }
    }

    /// The `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn full_name(&self) -> &'static str {
        self.full_name
    }

    /// Type name with module paths removed.
    pub fn name(&self) -> String {
        short_type_name(self.full_name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.full_name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Strip module paths from every path segment of a type name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
        } else {
            out.push(c);
            if !(c.is_alphanumeric() || c == '_') {
                segment_start = out.len();
            }
        }
    }
    out
}

/// Constructor entry points of a [`FromJson`] type.
#[derive(Clone, Copy)]
pub(crate) struct Constructor {
    pub(crate) describe: fn(&mut DescriptorBuilder),
    pub(crate) construct: ConstructFn,
}

/// A target object type.
#[derive(Clone)]
pub struct ObjectType {
    key: TypeKey,
    constructor: Option<Constructor>,
}

impl ObjectType {
    /// Constructible object type.
    pub fn of<T: FromJson>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            constructor: Some(Constructor {
                describe: T::describe,
                construct: construct_erased::<T>,
            }),
        }
    }

    /// Type without a constructor.
    pub fn opaque<T: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            constructor: None,
        }
    }

    /// Identity of the type.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Check if the type has a registered constructor.
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("key", &self.key)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

/// Declared type of a constructor parameter.
#[derive(Clone, Debug)]
pub enum TypeRef {
    /// A primitive with a default codec
    Primitive(PrimitiveType),
    /// An object type
    Object(ObjectType),
    /// An ordered list
    List(Box<TypeRef>),
    /// The raw [`JsonScalar`], unconverted
    Scalar,
}

impl TypeRef {
    /// Primitive `T`.
    pub fn primitive<T: Primitive>() -> Self {
        TypeRef::Primitive(T::TYPE)
    }

    /// Constructible object `T`.
    pub fn object<T: FromJson>() -> Self {
        TypeRef::Object(ObjectType::of::<T>())
    }

    /// Opaque type `T`.
    pub fn opaque<T: ?Sized + 'static>() -> Self {
        TypeRef::Object(ObjectType::opaque::<T>())
    }

    /// List of `element`.
    pub fn list(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    /// Check if this is a list type.
    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }

    /// Element type of a list.
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::List(element) => Some(element),
            _ => None,
        }
    }

    /// The type after stripping every list layer.
    pub fn innermost(&self) -> &TypeRef {
        let mut current = self;
        while let TypeRef::List(element) = current {
            current = element;
        }
        current
    }

    /// `TypeId` of the native value of the innermost type.
    pub fn native_type_id(&self) -> TypeId {
        match self.innermost() {
            TypeRef::Primitive(primitive) => primitive.native_type_id(),
            TypeRef::Object(object) => object.key().id(),
            TypeRef::Scalar => TypeId::of::<JsonScalar>(),
            TypeRef::List(_) => TypeId::of::<Vec<Native>>(),
        }
    }

    /// Readable name, used in error messages.
    pub fn name(&self) -> String {
        match self {
            TypeRef::Primitive(primitive) => primitive.rust_name().to_string(),
            TypeRef::Object(object) => object.key().name(),
            TypeRef::List(element) => format!("Vec<{}>", element.name()),
            TypeRef::Scalar => "JsonScalar".to_string(),
        }
    }

    /// Same list nesting with the innermost object type replaced.
    ///
    /// Returns `None` if the innermost type is not an object.
    pub(crate) fn with_innermost(&self, replacement: &ObjectType) -> Option<TypeRef> {
        match self {
            TypeRef::List(element) => element.with_innermost(replacement).map(TypeRef::list),
            TypeRef::Object(_) => Some(TypeRef::Object(replacement.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Type-erased conversion from a concrete value into the declared type.
pub(crate) type UpcastFn = Arc<dyn Fn(Native) -> Result<Native> + Send + Sync>;

/// Concrete type to construct for an abstractly-typed parameter.
///
/// # Example
///
/// ```
/// use jsonseed::{Arguments, DescriptorBuilder, FromJson, Result, Substitution};
///
/// trait Shape: Send {
///     fn area(&self) -> f64;
/// }
///
/// struct Square {
///     side: f64,
/// }
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.side * self.side
///     }
/// }
///
/// impl FromJson for Square {
///     fn describe(d: &mut DescriptorBuilder) {
///         d.value::<f64>("side");
///     }
///
///     fn construct(args: &mut Arguments) -> Result<Self> {
///         Ok(Square { side: args.take("side")? })
///     }
/// }
///
/// let sub = Substitution::of::<Square, Box<dyn Shape>>(|s| Box::new(s));
/// assert_eq!(sub.target().name(), "Box<dyn Shape>");
/// ```
#[derive(Clone)]
pub struct Substitution {
    concrete: ObjectType,
    target: TypeKey,
    upcast: UpcastFn,
}

impl Substitution {
    /// Construct `C` wherever `A` is declared, converting with `upcast`.
    pub fn of<C: FromJson, A: Any + Send>(upcast: fn(C) -> A) -> Self {
        let convert = move |native: Native| -> Result<Native> {
            let concrete = native.downcast::<C>().map_err(|other| {
                DeserializeError::Other(format!(
                    "Expected {} from constructor, found {}",
                    short_type_name(type_name::<C>()),
                    other.kind()
                ))
            })?;
            Ok(Native::value(upcast(concrete)))
        };
        Self {
            concrete: ObjectType::of::<C>(),
            target: TypeKey::of::<A>(),
            upcast: Arc::new(convert),
        }
    }

    /// Type that is constructed.
    pub fn concrete(&self) -> &ObjectType {
        &self.concrete
    }

    /// Declared type the constructed value is converted into.
    pub fn target(&self) -> TypeKey {
        self.target
    }

    pub(crate) fn upcast(&self) -> UpcastFn {
        Arc::clone(&self.upcast)
    }
}

impl fmt::Debug for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Substitution")
            .field("concrete", &self.concrete.key())
            .field("target", &self.target)
            .finish()
    }
}
