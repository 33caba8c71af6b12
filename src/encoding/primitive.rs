// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Default codecs for primitive types.
//!
//! Numbers arrive as a [`JsonNumber`] and are narrowed or widened to the
//! declared primitive. Integer narrowing is range-checked; integer codecs
//! accept floats with a zero fraction.

use std::marker::PhantomData;

use super::codec::ValueCodec;
use crate::core::{DeserializeError, JsonNumber, JsonScalar, Primitive, Result};

fn expect_number(scalar: &JsonScalar) -> Result<JsonNumber> {
    scalar
        .as_number()
        .ok_or_else(|| DeserializeError::invalid_value("number", scalar.to_string()))
}

/// Codec for the fixed-width integer types.
pub struct IntegerCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> IntegerCodec<T> {
    /// Create a codec for `T`.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for IntegerCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueCodec for IntegerCodec<T>
where
    T: Primitive + Copy + TryFrom<i128> + Into<i128>,
{
    type Value = T;

    fn from_json(&self, scalar: &JsonScalar) -> Result<T> {
        let number = expect_number(scalar)?;
        let wide = number
            .as_i128()
            .ok_or_else(|| DeserializeError::invalid_value("integer", number.to_string()))?;
        T::try_from(wide)
            .map_err(|_| DeserializeError::out_of_range(T::TYPE.to_string(), wide.to_string()))
    }

    fn to_json(&self, value: &T) -> Result<JsonScalar> {
        let wide: i128 = (*value).into();
        let number = if let Ok(signed) = i64::try_from(wide) {
            JsonNumber::Int(signed)
        } else if let Ok(unsigned) = u64::try_from(wide) {
            JsonNumber::UInt(unsigned)
        } else {
            return Err(DeserializeError::out_of_range("JSON number", wide.to_string()));
        };
        Ok(JsonScalar::Number(number))
    }
}

/// Floating-point primitives.
pub trait FloatPrimitive: Primitive + Copy {
    /// Narrow from f64, or `None` if a finite value overflows.
    fn from_f64(value: f64) -> Option<Self>;

    /// Widen to f64.
    fn to_f64(self) -> f64;
}

impl FloatPrimitive for f32 {
    fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() && value.abs() > f32::MAX as f64 {
            None
        } else {
            Some(value as f32)
        }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl FloatPrimitive for f64 {
    fn from_f64(value: f64) -> Option<Self> {
        Some(value)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Codec for `f32` and `f64`.
pub struct FloatCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FloatCodec<T> {
    /// Create a codec for `T`.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FloatCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatPrimitive> ValueCodec for FloatCodec<T> {
    type Value = T;

    fn from_json(&self, scalar: &JsonScalar) -> Result<T> {
        let number = expect_number(scalar)?;
        T::from_f64(number.as_f64())
            .ok_or_else(|| DeserializeError::out_of_range(T::TYPE.to_string(), number.to_string()))
    }

    fn to_json(&self, value: &T) -> Result<JsonScalar> {
        let wide = value.to_f64();
        if !wide.is_finite() {
            return Err(DeserializeError::out_of_range("JSON number", wide.to_string()));
        }
        Ok(JsonScalar::Number(JsonNumber::Float(wide)))
    }
}

/// Codec for `bool`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolCodec;

impl ValueCodec for BoolCodec {
    type Value = bool;

    fn from_json(&self, scalar: &JsonScalar) -> Result<bool> {
        scalar
            .as_bool()
            .ok_or_else(|| DeserializeError::invalid_value("boolean", scalar.to_string()))
    }

    fn to_json(&self, value: &bool) -> Result<JsonScalar> {
        Ok(JsonScalar::Bool(*value))
    }
}

/// Codec for `String`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringCodec;

impl ValueCodec for StringCodec {
    type Value = String;

    fn from_json(&self, scalar: &JsonScalar) -> Result<String> {
        scalar
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DeserializeError::invalid_value("string", scalar.to_string()))
    }

    fn to_json(&self, value: &String) -> Result<JsonScalar> {
        Ok(JsonScalar::String(value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> JsonScalar {
        JsonScalar::Number(JsonNumber::Int(v))
    }

    fn float(v: f64) -> JsonScalar {
        JsonScalar::Number(JsonNumber::Float(v))
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(IntegerCodec::<i8>::new().from_json(&int(-128)).unwrap(), -128);
        assert_eq!(IntegerCodec::<u16>::new().from_json(&int(65535)).unwrap(), 65535);
        assert_eq!(IntegerCodec::<i32>::new().from_json(&int(1998)).unwrap(), 1998);
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = IntegerCodec::<i8>::new().from_json(&int(300)).unwrap_err();
        assert_eq!(err.to_string(), "Number 300 is out of range for i8");

        let err = IntegerCodec::<u32>::new().from_json(&int(-1)).unwrap_err();
        assert!(matches!(err, DeserializeError::OutOfRange { .. }));
    }

    #[test]
    fn test_integer_accepts_integral_float() {
        assert_eq!(IntegerCodec::<i64>::new().from_json(&float(42.0)).unwrap(), 42);
        let err = IntegerCodec::<i64>::new().from_json(&float(4.5)).unwrap_err();
        assert_eq!(err.to_string(), "Expected integer, was: 4.5");
    }

    #[test]
    fn test_integer_rejects_non_number() {
        let err = IntegerCodec::<i32>::new()
            .from_json(&JsonScalar::String("abc".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected number, was: \"abc\"");
    }

    #[test]
    fn test_u64_round_trip() {
        let codec = IntegerCodec::<u64>::new();
        let scalar = codec.to_json(&u64::MAX).unwrap();
        assert_eq!(scalar, JsonScalar::Number(JsonNumber::UInt(u64::MAX)));
        assert_eq!(codec.from_json(&scalar).unwrap(), u64::MAX);
        assert_eq!(codec.to_json(&7).unwrap(), int(7));
    }

    #[test]
    fn test_float_codecs() {
        assert_eq!(FloatCodec::<f64>::new().from_json(&int(3)).unwrap(), 3.0);
        assert_eq!(FloatCodec::<f32>::new().from_json(&float(1.5)).unwrap(), 1.5f32);
        let err = FloatCodec::<f32>::new().from_json(&float(1e300)).unwrap_err();
        assert!(matches!(err, DeserializeError::OutOfRange { .. }));
        assert_eq!(FloatCodec::<f64>::new().to_json(&0.25).unwrap(), float(0.25));
        assert!(FloatCodec::<f64>::new().to_json(&f64::NAN).is_err());
    }

    #[test]
    fn test_bool_and_string() {
        assert!(BoolCodec.from_json(&JsonScalar::Bool(true)).unwrap());
        let err = BoolCodec.from_json(&int(1)).unwrap_err();
        assert_eq!(err.to_string(), "Expected boolean, was: 1");

        assert_eq!(
            StringCodec.from_json(&JsonScalar::String("J. Heller".into())).unwrap(),
            "J. Heller"
        );
        assert!(StringCodec.from_json(&JsonScalar::Null).is_err());
    }
}
