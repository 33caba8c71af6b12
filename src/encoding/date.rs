// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Date codecs over `chrono`.
//!
//! A [`DateCodec`] is built per date-format directive, so two parameters
//! of the same date type may use different patterns.

use std::any::TypeId;
use std::fmt::Write as _;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::codec::{DynValueCodec, ValueCodec};
use crate::core::{DeserializeError, JsonScalar, Result};

/// Date and time types that can be read with a strftime pattern.
pub trait DateLike: Send + Sized + 'static {
    /// Parse `text` with `pattern`.
    fn parse_with(text: &str, pattern: &str) -> std::result::Result<Self, chrono::ParseError>;

    /// Format with `pattern` into `out`.
    fn format_with(&self, pattern: &str, out: &mut String) -> std::fmt::Result;
}

macro_rules! impl_date_like {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DateLike for $ty {
                fn parse_with(
                    text: &str,
                    pattern: &str,
                ) -> std::result::Result<Self, chrono::ParseError> {
                    <$ty>::parse_from_str(text, pattern)
                }

                fn format_with(&self, pattern: &str, out: &mut String) -> std::fmt::Result {
                    write!(out, "{}", self.format(pattern))
                }
            }
        )*
    };
}

impl_date_like!(NaiveDate, NaiveDateTime, NaiveTime, DateTime<FixedOffset>);

/// Check that `pattern` is a valid strftime pattern.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DeserializeError::invalid_value(
            "strftime pattern",
            format!("{pattern:?}"),
        ));
    }
    Ok(())
}

/// Codec for a date type with a fixed pattern.
pub struct DateCodec<D> {
    pattern: String,
    _marker: PhantomData<fn() -> D>,
}

impl<D: DateLike> DateCodec<D> {
    /// Create a codec; fails if `pattern` is not a valid strftime pattern.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        validate_pattern(&pattern)?;
        Ok(Self {
            pattern,
            _marker: PhantomData,
        })
    }

    /// The configured pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl<D: DateLike> ValueCodec for DateCodec<D> {
    type Value = D;

    fn from_json(&self, scalar: &JsonScalar) -> Result<D> {
        let text = scalar
            .as_str()
            .ok_or_else(|| DeserializeError::invalid_value("string", scalar.to_string()))?;
        D::parse_with(text, &self.pattern).map_err(|e| DeserializeError::DateFormat {
            pattern: self.pattern.clone(),
            value: text.to_string(),
            reason: e.to_string(),
        })
    }

    fn to_json(&self, value: &D) -> Result<JsonScalar> {
        let mut out = String::new();
        value
            .format_with(&self.pattern, &mut out)
            .map_err(|_| DeserializeError::DateFormat {
                pattern: self.pattern.clone(),
                value: std::any::type_name::<D>().to_string(),
                reason: "value cannot be formatted with this pattern".to_string(),
            })?;
        Ok(JsonScalar::String(out))
    }
}

/// Build a date codec for the date type identified by `type_id`.
///
/// Returns `Ok(None)` if `type_id` is not a supported date type.
pub fn date_codec_for(type_id: TypeId, pattern: &str) -> Result<Option<Arc<dyn DynValueCodec>>> {
    let codec: Arc<dyn DynValueCodec> = if type_id == TypeId::of::<NaiveDate>() {
        Arc::new(DateCodec::<NaiveDate>::new(pattern)?)
    } else if type_id == TypeId::of::<NaiveDateTime>() {
        Arc::new(DateCodec::<NaiveDateTime>::new(pattern)?)
    } else if type_id == TypeId::of::<NaiveTime>() {
        Arc::new(DateCodec::<NaiveTime>::new(pattern)?)
    } else if type_id == TypeId::of::<DateTime<FixedOffset>>() {
        Arc::new(DateCodec::<DateTime<FixedOffset>>::new(pattern)?)
    } else {
        return Ok(None);
    };
    Ok(Some(codec))
}
