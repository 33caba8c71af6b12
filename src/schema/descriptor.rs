// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-type construction metadata.
//!
//! [`DescriptorBuilder`] collects what a type's `describe` declares; the
//! cache then resolves those declarations into an immutable [`Descriptor`]:
//! effective JSON names, substitutions and codecs.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::constructor::{Arguments, ConstructFn, FromJson};
use super::types::{Substitution, TypeKey, TypeRef, UpcastFn};
use crate::core::{DeserializeError, Native, Primitive, Result};
use crate::encoding::{date_codec_for, CodecRegistry, DynValueCodec, ValueCodec};

// =============================================================================
// Declarations
// =============================================================================

/// Declaration of one constructor parameter.
///
/// Returned by the [`DescriptorBuilder`] methods; directive methods chain.
pub struct ParamBuilder {
    name: String,
    type_ref: TypeRef,
    bound: bool,
    json_name: Option<String>,
    nullable: bool,
    optional: bool,
    codec: Option<Arc<dyn DynValueCodec>>,
    date_format: Option<String>,
    substitution: Option<Substitution>,
}

impl ParamBuilder {
    fn new(name: String, type_ref: TypeRef, bound: bool) -> Self {
        Self {
            name,
            type_ref,
            bound,
            json_name: None,
            nullable: false,
            optional: false,
            codec: None,
            date_format: None,
            substitution: None,
        }
    }

    /// Read this parameter from key `name` instead of its declared name.
    pub fn json_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.json_name = Some(name.into());
        self
    }

    /// Accept `null`; a missing key is also accepted.
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// The constructor supplies a default when the key is missing.
    pub fn optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }

    /// Decode values (list elements, for list parameters) with `codec`.
    pub fn codec<C: ValueCodec>(&mut self, codec: C) -> &mut Self {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Decode a date type with the strftime `pattern`.
    pub fn date_format(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.date_format = Some(pattern.into());
        self
    }

    /// Construct a concrete type for this abstractly-typed parameter.
    pub fn deserialize_as(&mut self, substitution: Substitution) -> &mut Self {
        self.substitution = Some(substitution);
        self
    }
}

/// Collects the parameter declarations of one type.
pub struct DescriptorBuilder {
    type_key: TypeKey,
    params: Vec<ParamBuilder>,
}

impl DescriptorBuilder {
    pub(crate) fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            params: Vec::new(),
        }
    }

    /// Declare a parameter of any type.
    pub fn param(&mut self, name: impl Into<String>, type_ref: TypeRef) -> &mut ParamBuilder {
        self.push(ParamBuilder::new(name.into(), type_ref, true))
    }

    /// Declare a primitive parameter.
    pub fn value<T: Primitive>(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::primitive::<T>())
    }

    /// Declare a list-of-primitives parameter.
    pub fn values<T: Primitive>(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::list(TypeRef::primitive::<T>()))
    }

    /// Declare a nested object parameter.
    pub fn object<T: FromJson>(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::object::<T>())
    }

    /// Declare a list-of-objects parameter.
    pub fn objects<T: FromJson>(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::list(TypeRef::object::<T>()))
    }

    /// Declare a parameter of a type without a constructor.
    ///
    /// Needs a codec, a date format or a substitution to be readable.
    pub fn opaque<T: ?Sized + 'static>(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::opaque::<T>())
    }

    /// Declare a list of a type without a constructor.
    pub fn opaques<T: ?Sized + 'static>(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::list(TypeRef::opaque::<T>()))
    }

    /// Declare a parameter receiving the raw [`JsonScalar`](crate::JsonScalar).
    pub fn scalar(&mut self, name: impl Into<String>) -> &mut ParamBuilder {
        self.param(name, TypeRef::Scalar)
    }

    /// Declare a parameter no JSON key can reach.
    ///
    /// It must be optional or nullable for construction to succeed.
    pub fn unbound(&mut self, name: impl Into<String>, type_ref: TypeRef) -> &mut ParamBuilder {
        self.push(ParamBuilder::new(name.into(), type_ref, false))
    }

    fn push(&mut self, param: ParamBuilder) -> &mut ParamBuilder {
        let index = self.params.len();
        self.params.push(param);
        &mut self.params[index]
    }

    /// Resolve the declarations into a descriptor.
    pub(crate) fn build(
        self,
        construct: ConstructFn,
        codecs: &CodecRegistry,
        substitutions: &HashMap<TypeKey, Substitution>,
    ) -> Result<Descriptor> {
        let type_name = self.type_key.name();
        let mut parameters = Vec::with_capacity(self.params.len());
        let mut json_index = HashMap::new();
        let mut declared_names = HashSet::new();

        for spec in self.params {
            if !declared_names.insert(spec.name.clone()) {
                return Err(DeserializeError::invalid_directive(
                    &type_name,
                    &spec.name,
                    "parameter declared twice",
                ));
            }

            if !spec.bound {
                warn!(
                    type_name = %type_name,
                    parameter = %spec.name,
                    "constructor parameter has no backing property and cannot be read from JSON"
                );
                parameters.push(Parameter {
                    name: spec.name,
                    json_name: None,
                    type_ref: spec.type_ref,
                    nullable: spec.nullable,
                    optional: spec.optional,
                    codec: None,
                    upcast: None,
                });
                continue;
            }

            let json_name = spec.json_name.clone().unwrap_or_else(|| spec.name.clone());
            if json_index.contains_key(&json_name) {
                return Err(DeserializeError::invalid_directive(
                    &type_name,
                    &spec.name,
                    format!("JSON name '{json_name}' is already used by another parameter"),
                ));
            }

            let (type_ref, upcast) = resolve_substitution(&type_name, &spec, substitutions)?;
            let codec = resolve_codec(&type_name, &spec, codecs)?;

            json_index.insert(json_name.clone(), parameters.len());
            parameters.push(Parameter {
                name: spec.name,
                json_name: Some(json_name),
                type_ref,
                nullable: spec.nullable,
                optional: spec.optional,
                codec,
                upcast,
            });
        }

        Ok(Descriptor {
            type_key: self.type_key,
            parameters,
            json_index,
            construct,
        })
    }
}

/// Per-property substitution first, then the cache-level one for the
/// declared abstract type.
fn resolve_substitution(
    type_name: &str,
    spec: &ParamBuilder,
    substitutions: &HashMap<TypeKey, Substitution>,
) -> Result<(TypeRef, Option<UpcastFn>)> {
    let declared_key = match spec.type_ref.innermost() {
        TypeRef::Object(object) => Some(object.key()),
        _ => None,
    };

    let substitution = match (&spec.substitution, declared_key) {
        (Some(sub), Some(key)) if sub.target() == key => sub,
        (Some(sub), _) => {
            return Err(DeserializeError::invalid_directive(
                type_name,
                &spec.name,
                format!(
                    "substitution converts into {}, but the parameter is declared as {}",
                    sub.target(),
                    spec.type_ref
                ),
            ))
        }
        (None, Some(key)) => match substitutions.get(&key) {
            Some(sub) => sub,
            None => return Ok((spec.type_ref.clone(), None)),
        },
        (None, None) => return Ok((spec.type_ref.clone(), None)),
    };

    match spec.type_ref.with_innermost(substitution.concrete()) {
        Some(type_ref) => Ok((type_ref, Some(substitution.upcast()))),
        None => Err(DeserializeError::invalid_directive(
            type_name,
            &spec.name,
            "substitution on a non-object parameter",
        )),
    }
}

/// Explicit codec, then date format, then the primitive default.
fn resolve_codec(
    type_name: &str,
    spec: &ParamBuilder,
    codecs: &CodecRegistry,
) -> Result<Option<Arc<dyn DynValueCodec>>> {
    let native_type = spec.type_ref.native_type_id();

    if let Some(codec) = &spec.codec {
        if codec.value_type() != native_type {
            return Err(DeserializeError::invalid_directive(
                type_name,
                &spec.name,
                format!(
                    "codec produces {}, but the parameter is declared as {}",
                    codec.value_type_name(),
                    spec.type_ref
                ),
            ));
        }
        return Ok(Some(Arc::clone(codec)));
    }

    if let Some(pattern) = &spec.date_format {
        return match date_codec_for(native_type, pattern) {
            Ok(Some(codec)) => Ok(Some(codec)),
            Ok(None) => Err(DeserializeError::invalid_directive(
                type_name,
                &spec.name,
                format!("date format on non-date type {}", spec.type_ref),
            )),
            Err(e) => Err(DeserializeError::invalid_directive(
                type_name,
                &spec.name,
                e.to_string(),
            )),
        };
    }

    Ok(match spec.type_ref.innermost() {
        TypeRef::Primitive(primitive) => codecs.get(*primitive),
        TypeRef::Scalar => Some(codecs.raw()),
        _ => None,
    })
}

// =============================================================================
// Resolved metadata
// =============================================================================

/// A resolved constructor parameter.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    json_name: Option<String>,
    type_ref: TypeRef,
    nullable: bool,
    optional: bool,
    codec: Option<Arc<dyn DynValueCodec>>,
    upcast: Option<UpcastFn>,
}

impl Parameter {
    /// Declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// JSON key, or `None` for an unbound parameter.
    pub fn json_name(&self) -> Option<&str> {
        self.json_name.as_deref()
    }

    /// Effective type, after substitution.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Check if null is accepted.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Check if the constructor has a default.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Check if a value must be present before construction.
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.optional
    }

    /// Check if a JSON key maps to this parameter.
    pub fn is_bound(&self) -> bool {
        self.json_name.is_some()
    }

    /// Check if a substitution replaced the declared type.
    pub fn is_substituted(&self) -> bool {
        self.upcast.is_some()
    }

    /// Assigned codec, applied to elements for list parameters.
    pub fn codec(&self) -> Option<&Arc<dyn DynValueCodec>> {
        self.codec.as_ref()
    }

    pub(crate) fn upcast(&self) -> Option<&UpcastFn> {
        self.upcast.as_ref()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("json_name", &self.json_name)
            .field("type_ref", &self.type_ref.name())
            .field("nullable", &self.nullable)
            .field("optional", &self.optional)
            .field("codec", &self.codec.as_ref().map(|c| c.value_type_name()))
            .field("substituted", &self.is_substituted())
            .finish()
    }
}

/// Immutable construction metadata for one type.
pub struct Descriptor {
    type_key: TypeKey,
    parameters: Vec<Parameter>,
    json_index: HashMap<String, usize>,
    construct: ConstructFn,
}

impl Descriptor {
    /// Identity of the described type.
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Short name of the described type.
    pub fn type_name(&self) -> String {
        self.type_key.name()
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameter at `index`.
    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    /// Find the parameter read from JSON key `json_name`.
    pub fn find(&self, json_name: &str) -> Option<(usize, &Parameter)> {
        let index = *self.json_index.get(json_name)?;
        Some((index, &self.parameters[index]))
    }

    /// Like [`find`](Self::find), but an unknown key is an error.
    pub fn lookup(&self, json_name: &str) -> Result<(usize, &Parameter)> {
        self.find(json_name)
            .ok_or_else(|| DeserializeError::unknown_parameter(json_name, self.type_name()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the constructor takes no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Check that every required parameter is present, then construct.
    pub fn instantiate(&self, mut values: BTreeMap<usize, Native>) -> Result<Native> {
        for (index, parameter) in self.parameters.iter().enumerate() {
            if parameter.is_required() && !values.contains_key(&index) {
                return Err(DeserializeError::missing_value(&parameter.name));
            }
        }
        let named = self
            .parameters
            .iter()
            .enumerate()
            .filter_map(|(index, p)| values.remove(&index).map(|v| (p.name.clone(), v)))
            .collect();
        let mut arguments = Arguments::new(self.type_name(), named);
        (self.construct)(&mut arguments)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("type", &self.type_key)
            .field("parameters", &self.parameters)
            .finish()
    }
}
