//! Blob storage trigger, input, and output bindings

use serde_json::json;

use crate::bindings::registry::{InputResolver, OutputResolver, TriggerResolver};
use crate::bindings::{
    field_or, output_slot, required_field, Binding, BindingError, BindingName, Direction,
    DEFAULT_STORAGE_CONNECTION,
};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

fn blob_properties(annotation: &AnnotationDescriptor) -> Result<Vec<(&'static str, serde_json::Value)>, BindingError> {
    let path = required_field(annotation, "path")?;
    let connection = field_or(annotation, "connection", DEFAULT_STORAGE_CONNECTION);
    Ok(vec![("path", json!(path)), ("connection", json!(connection))])
}

pub struct BlobTriggerResolver;

impl TriggerResolver for BlobTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        _service: &ServiceDecl,
        _function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        Ok(Binding::new(
            "blobTrigger",
            Direction::In,
            BindingName::Slot("blobIn".to_string()),
            blob_properties(annotation)?,
        ))
    }
}

pub struct BlobInputResolver;

impl InputResolver for BlobInputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        param_name: &str,
    ) -> Result<Binding, BindingError> {
        Ok(Binding::new(
            "blob",
            Direction::In,
            BindingName::Variable(param_name.to_string()),
            blob_properties(annotation)?,
        ))
    }
}

pub struct BlobOutputResolver;

impl OutputResolver for BlobOutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        Ok(Binding::new(
            "blob",
            Direction::Out,
            output_slot("outBlob", ordinal),
            blob_properties(annotation)?,
        ))
    }
}
