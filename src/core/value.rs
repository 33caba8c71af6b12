// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Value types shared by the tokenizer, codecs and seeds.
//!
//! - [`JsonNumber`] / [`JsonScalar`] - scalar payloads as read from JSON text
//! - [`Native`] - type-erased constructed values handed to constructors
//! - [`PrimitiveType`] - the primitives that have default codecs

use std::any::{Any, TypeId};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Generic numeric representation of a JSON number.
///
/// Integers that fit `i64` are `Int`, larger non-negative integers are
/// `UInt`, anything with a fraction or exponent is `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JsonNumber {
    /// Signed integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating point
    Float(f64),
}

impl JsonNumber {
    /// Check if this number was written as an integer.
    pub fn is_integer(&self) -> bool {
        !matches!(self, JsonNumber::Float(_))
    }

    /// Widen to f64.
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Int(v) => *v as f64,
            JsonNumber::UInt(v) => *v as f64,
            JsonNumber::Float(v) => *v,
        }
    }

    /// Widen to i128 when the value is integral.
    ///
    /// Floats qualify only with a zero fraction and a magnitude that
    /// fits `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            JsonNumber::Int(v) => Some(*v as i128),
            JsonNumber::UInt(v) => Some(*v as i128),
            JsonNumber::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1.0e38 {
                    Some(*v as i128)
                } else {
                    None
                }
            }
        }
    }
}

impl From<i64> for JsonNumber {
    fn from(v: i64) -> Self {
        JsonNumber::Int(v)
    }
}

impl From<u64> for JsonNumber {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(signed) => JsonNumber::Int(signed),
            Err(_) => JsonNumber::UInt(v),
        }
    }
}

impl From<f64> for JsonNumber {
    fn from(v: f64) -> Self {
        JsonNumber::Float(v)
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Int(v) => write!(f, "{v}"),
            JsonNumber::UInt(v) => write!(f, "{v}"),
            JsonNumber::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// A JSON scalar: everything that is neither an object nor an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JsonScalar {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any number
    Number(JsonNumber),
    /// String with escapes resolved
    String(String),
}

impl JsonScalar {
    /// Check if this scalar is null.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonScalar::Null)
    }

    /// Try to get the inner string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonScalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonScalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner number.
    pub fn as_number(&self) -> Option<JsonNumber> {
        match self {
            JsonScalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the JSON type name of this scalar.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonScalar::Null => "null",
            JsonScalar::Bool(_) => "boolean",
            JsonScalar::Number(JsonNumber::Float(_)) => "float",
            JsonScalar::Number(_) => "integer",
            JsonScalar::String(_) => "string",
        }
    }
}

impl fmt::Display for JsonScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonScalar::Null => write!(f, "null"),
            JsonScalar::Bool(b) => write!(f, "{b}"),
            JsonScalar::Number(n) => write!(f, "{n}"),
            JsonScalar::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// A constructed, type-erased value.
///
/// Seeds produce `Native` values; constructors take them apart again
/// through [`Arguments`](crate::schema::Arguments).
pub enum Native {
    /// JSON `null` accepted by a nullable parameter
    Null,
    /// A decoded scalar or a constructed object
    Value(Box<dyn Any + Send>),
    /// An ordered list of values
    List(Vec<Native>),
}

impl Native {
    /// Wrap a concrete value.
    pub fn value<T: Any + Send>(value: T) -> Self {
        Native::Value(Box::new(value))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Native::Null)
    }

    /// Check if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        match self {
            Native::Value(v) => v.is::<T>(),
            _ => false,
        }
    }

    /// Take the wrapped value out as a `T`, or give `self` back.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Native> {
        match self {
            Native::Value(v) => v.downcast::<T>().map(|b| *b).map_err(Native::Value),
            other => Err(other),
        }
    }

    /// Take the elements of a list, or give `self` back.
    pub fn into_items(self) -> std::result::Result<Vec<Native>, Native> {
        match self {
            Native::List(items) => Ok(items),
            other => Err(other),
        }
    }

    /// Take a list of `T`, or give `self` back if any element is not a `T`.
    pub fn into_vec<T: Any>(self) -> std::result::Result<Vec<T>, Native> {
        let items = self.into_items()?;
        if !items.iter().all(|item| item.is::<T>()) {
            return Err(Native::List(items));
        }
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(item.downcast::<T>()?);
        }
        Ok(values)
    }

    /// Short description of the value kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Native::Null => "null",
            Native::Value(_) => "value",
            Native::List(_) => "list",
        }
    }
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Native::Null => write!(f, "Null"),
            Native::Value(_) => write!(f, "Value(..)"),
            Native::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

/// Primitive types with a default codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// String
    String,
}

impl PrimitiveType {
    /// Every primitive type, in declaration order.
    pub const ALL: [PrimitiveType; 12] = [
        PrimitiveType::Bool,
        PrimitiveType::Int8,
        PrimitiveType::Int16,
        PrimitiveType::Int32,
        PrimitiveType::Int64,
        PrimitiveType::UInt8,
        PrimitiveType::UInt16,
        PrimitiveType::UInt32,
        PrimitiveType::UInt64,
        PrimitiveType::Float32,
        PrimitiveType::Float64,
        PrimitiveType::String,
    ];

    /// `TypeId` of the native type.
    pub fn native_type_id(self) -> TypeId {
        match self {
            PrimitiveType::Bool => TypeId::of::<bool>(),
            PrimitiveType::Int8 => TypeId::of::<i8>(),
            PrimitiveType::Int16 => TypeId::of::<i16>(),
            PrimitiveType::Int32 => TypeId::of::<i32>(),
            PrimitiveType::Int64 => TypeId::of::<i64>(),
            PrimitiveType::UInt8 => TypeId::of::<u8>(),
            PrimitiveType::UInt16 => TypeId::of::<u16>(),
            PrimitiveType::UInt32 => TypeId::of::<u32>(),
            PrimitiveType::UInt64 => TypeId::of::<u64>(),
            PrimitiveType::Float32 => TypeId::of::<f32>(),
            PrimitiveType::Float64 => TypeId::of::<f64>(),
            PrimitiveType::String => TypeId::of::<String>(),
        }
    }

    /// Rust name of the native type.
    pub const fn rust_name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "i8",
            PrimitiveType::Int16 => "i16",
            PrimitiveType::Int32 => "i32",
            PrimitiveType::Int64 => "i64",
            PrimitiveType::UInt8 => "u8",
            PrimitiveType::UInt16 => "u16",
            PrimitiveType::UInt32 => "u32",
            PrimitiveType::UInt64 => "u64",
            PrimitiveType::Float32 => "f32",
            PrimitiveType::Float64 => "f64",
            PrimitiveType::String => "String",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.rust_name())
    }
}

/// Native Rust types that map onto a [`PrimitiveType`].
pub trait Primitive: Any + Send {
    /// The primitive this type corresponds to.
    const TYPE: PrimitiveType;
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const TYPE: PrimitiveType = PrimitiveType::$variant;
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    String => String,
}
