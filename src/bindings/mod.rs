//! Uniform binding model
//!
//! Every trigger, input, and output binding normalizes into the same value:
//! a host type tag, a direction, a name, and an ordered list of kind-specific
//! properties. The serialization contract is part of the model: a `Binding`
//! always serializes `type`, `direction`, `name` first, followed by the
//! kind-specific properties in the order the resolver registered them, so
//! identical inputs yield byte-identical JSON.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::syntax::AnnotationDescriptor;

pub mod blob;
pub mod cosmosdb;
pub mod eventhub;
pub mod http;
pub mod queue;
pub mod registry;
pub mod servicebus;
pub mod timer;
pub mod twilio;

pub use registry::{BindingRegistry, InputResolver, OutputResolver, TriggerResolver};

/// Default storage connection setting name, shared by the storage-backed kinds.
pub const DEFAULT_STORAGE_CONNECTION: &str = "AzureWebJobsStorage";

/// Errors produced while resolving an annotation into a binding.
#[derive(Debug, Error, PartialEq)]
pub enum BindingError {
    /// The annotation sits in a binding position but matches no registered kind.
    #[error("unsupported annotation '@af:{0}' in a binding position")]
    UnsupportedAnnotation(String),

    /// A required annotation field is absent.
    #[error("annotation '@af:{annotation}' is missing the required field '{field}'")]
    MissingField { annotation: String, field: String },
}

/// Binding direction, fully determined by the binding's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The name a binding is exposed under in the host descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingName {
    /// A user-declared variable, e.g. an annotated parameter name.
    Variable(String),
    /// A host-assigned slot name, e.g. `httpPayload` or `outMsg`.
    Slot(String),
    /// An unnamed return slot; ordinal 0 renders as the host's `$return`.
    Return(u32),
}

impl BindingName {
    pub fn render(&self) -> String {
        match self {
            BindingName::Variable(name) | BindingName::Slot(name) => name.clone(),
            BindingName::Return(0) => "$return".to_string(),
            BindingName::Return(ordinal) => format!("$return{}", ordinal),
        }
    }
}

/// Slot name for an output binding at the given return ordinal.
///
/// Composite returns hold multiple output targets; ordinals past the first
/// get the ordinal appended so slot names stay unique within a function.
pub(crate) fn output_slot(base: &str, ordinal: u32) -> BindingName {
    if ordinal == 0 {
        BindingName::Slot(base.to_string())
    } else {
        BindingName::Slot(format!("{}{}", base, ordinal))
    }
}

/// A fully-resolved binding.
///
/// Constructed in one shot by a resolver; no partially-built state is ever
/// observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    binding_type: &'static str,
    direction: Direction,
    name: BindingName,
    properties: Vec<(&'static str, Value)>,
}

impl Binding {
    pub fn new(
        binding_type: &'static str,
        direction: Direction,
        name: BindingName,
        properties: Vec<(&'static str, Value)>,
    ) -> Self {
        Self {
            binding_type,
            direction,
            name,
            properties,
        }
    }

    pub fn binding_type(&self) -> &str {
        self.binding_type
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn name(&self) -> &BindingName {
        &self.name
    }

    /// Looks up a kind-specific property, mainly for assertions in tests.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

impl Serialize for Binding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3 + self.properties.len()))?;
        map.serialize_entry("type", self.binding_type)?;
        map.serialize_entry("direction", self.direction.as_str())?;
        map.serialize_entry("name", &self.name.render())?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Fetches a required annotation field, failing fast when absent.
pub(crate) fn required_field(
    annotation: &AnnotationDescriptor,
    field: &str,
) -> Result<String, BindingError> {
    annotation
        .field(field)
        .map(str::to_string)
        .ok_or_else(|| BindingError::MissingField {
            annotation: annotation.name.clone(),
            field: field.to_string(),
        })
}

/// Fetches an optional annotation field, expanding the default when absent.
pub(crate) fn field_or(annotation: &AnnotationDescriptor, field: &str, default: &str) -> String {
    annotation.field(field).unwrap_or(default).to_string()
}
