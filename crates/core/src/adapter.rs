// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deployment adapter records.
//!
//! An adapter's configuration type is described by a [`ConfigurationShape`]:
//! a static table of field names and default values, built once per adapter
//! type. The user's explicit settings live in [`ContainerProperties`], a
//! string map keyed by field name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Int,
    Str,
    Bool,
}

crate::simple_display! {
    FieldKind {
        Int => "int",
        Str => "str",
        Bool => "bool",
    }
}

/// Default value of a configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Bool(_) => FieldKind::Bool,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// Renders the value the way it would appear in a property map.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Str(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub default: FieldValue,
}

impl ConfigField {
    pub fn new(name: impl Into<String>, default: FieldValue) -> Self {
        Self { name: name.into(), default }
    }

    pub fn kind(&self) -> FieldKind {
        self.default.kind()
    }
}

/// Ordered field table for an adapter's configuration type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationShape {
    fields: Vec<ConfigField>,
}

impl ConfigurationShape {
    pub fn new(fields: Vec<ConfigField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ConfigField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A value written into a property map by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOverride {
    pub field: String,
    pub value: String,
}

impl PropertyOverride {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }
}

/// Explicit property values for one container.
///
/// A key present here counts as explicitly set. Values written through
/// [`override_property`](Self::override_property) are also recorded in an
/// override log so callers can see what reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerProperties {
    values: IndexMap<String, String>,
    #[serde(skip)]
    overrides: Vec<PropertyOverride>,
}

impl ContainerProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Set a user-supplied value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Write a reconciled value and record it in the override log.
    pub fn override_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.values.insert(key.clone(), value.clone());
        self.overrides.push(PropertyOverride { field: key, value });
    }

    pub fn overrides(&self) -> &[PropertyOverride] {
        &self.overrides
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContainerProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { values, overrides: Vec::new() }
    }
}

/// One deployment adapter registered for a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterRecord {
    pub name: String,
    pub shape: ConfigurationShape,
    #[serde(default)]
    pub properties: ContainerProperties,
}

impl AdapterRecord {
    pub fn new(name: impl Into<String>, shape: ConfigurationShape) -> Self {
        Self { name: name.into(), shape, properties: ContainerProperties::new() }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Explicit value for `field`, falling back to the shape default.
    pub fn current_value(&self, field: &str) -> Option<String> {
        self.properties
            .get(field)
            .map(str::to_string)
            .or_else(|| self.shape.field(field).map(|f| f.default.to_string()))
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
