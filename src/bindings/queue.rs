//! Storage queue trigger and output bindings

use serde_json::json;

use crate::bindings::registry::{OutputResolver, TriggerResolver};
use crate::bindings::{
    field_or, output_slot, required_field, Binding, BindingError, BindingName, Direction,
    DEFAULT_STORAGE_CONNECTION,
};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

pub struct QueueTriggerResolver;

impl TriggerResolver for QueueTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        _service: &ServiceDecl,
        _function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        let queue_name = required_field(annotation, "queueName")?;
        let connection = field_or(annotation, "connection", DEFAULT_STORAGE_CONNECTION);

        Ok(Binding::new(
            "queueTrigger",
            Direction::In,
            BindingName::Slot("inMsg".to_string()),
            vec![
                ("queueName", json!(queue_name)),
                ("connection", json!(connection)),
            ],
        ))
    }
}

pub struct QueueOutputResolver;

impl OutputResolver for QueueOutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        let queue_name = required_field(annotation, "queueName")?;
        let connection = field_or(annotation, "connection", DEFAULT_STORAGE_CONNECTION);

        Ok(Binding::new(
            "queue",
            Direction::Out,
            output_slot("outMsg", ordinal),
            vec![
                ("queueName", json!(queue_name)),
                ("connection", json!(connection)),
            ],
        ))
    }
}
