// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type metadata.
//!
//! This module describes how target types are built from JSON objects:
//! - [`types`] - Declared parameter types and polymorphic substitutions
//! - [`constructor`] - The [`FromJson`] registration trait and [`Arguments`]
//! - [`descriptor`] - Per-type resolved metadata
//! - [`cache`] - Thread-safe memoizing [`DescriptorCache`]

pub mod cache;
pub mod constructor;
pub mod descriptor;
pub mod types;

pub use cache::{CacheBuilder, DescriptorCache};
pub use constructor::{Arguments, FromJson};
pub use descriptor::{Descriptor, DescriptorBuilder, ParamBuilder, Parameter};
pub use types::{ObjectType, Substitution, TypeKey, TypeRef};
