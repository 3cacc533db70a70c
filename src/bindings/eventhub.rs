//! Event hub trigger and output bindings

use serde_json::json;

use crate::bindings::registry::{OutputResolver, TriggerResolver};
use crate::bindings::{
    field_or, output_slot, required_field, Binding, BindingError, BindingName, Direction,
};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

pub struct EventHubTriggerResolver;

impl TriggerResolver for EventHubTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        _service: &ServiceDecl,
        _function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        let event_hub_name = required_field(annotation, "eventHubName")?;
        let connection = required_field(annotation, "connection")?;
        let consumer_group = field_or(annotation, "consumerGroup", "$Default");

        Ok(Binding::new(
            "eventHubTrigger",
            Direction::In,
            BindingName::Slot("eventHubMsg".to_string()),
            vec![
                ("eventHubName", json!(event_hub_name)),
                ("connection", json!(connection)),
                ("consumerGroup", json!(consumer_group)),
            ],
        ))
    }
}

pub struct EventHubOutputResolver;

impl OutputResolver for EventHubOutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        let event_hub_name = required_field(annotation, "eventHubName")?;
        let connection = required_field(annotation, "connection")?;

        Ok(Binding::new(
            "eventHub",
            Direction::Out,
            output_slot("outEvent", ordinal),
            vec![
                ("eventHubName", json!(event_hub_name)),
                ("connection", json!(connection)),
            ],
        ))
    }
}
