//! Service bus trigger and output bindings

use serde_json::json;

use crate::bindings::registry::{OutputResolver, TriggerResolver};
use crate::bindings::{
    output_slot, required_field, Binding, BindingError, BindingName, Direction,
};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

pub struct ServiceBusTriggerResolver;

impl TriggerResolver for ServiceBusTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        _service: &ServiceDecl,
        _function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        let queue_name = required_field(annotation, "queueName")?;
        let connection = required_field(annotation, "connection")?;

        Ok(Binding::new(
            "serviceBusTrigger",
            Direction::In,
            BindingName::Slot("sbMsg".to_string()),
            vec![
                ("queueName", json!(queue_name)),
                ("connection", json!(connection)),
            ],
        ))
    }
}

pub struct ServiceBusOutputResolver;

impl OutputResolver for ServiceBusOutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        let queue_name = required_field(annotation, "queueName")?;
        let connection = required_field(annotation, "connection")?;

        Ok(Binding::new(
            "serviceBus",
            Direction::Out,
            output_slot("outSbMsg", ordinal),
            vec![
                ("queueName", json!(queue_name)),
                ("connection", json!(connection)),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_bus_trigger() {
        let annotation = AnnotationDescriptor::binding("ServiceBusTrigger")
            .with_field("queueName", "jobs")
            .with_field("connection", "ServiceBusConnection");
        let binding = ServiceBusTriggerResolver
            .resolve(&annotation, &ServiceDecl::new(""), &FunctionDecl::new("default"))
            .unwrap();

        assert_eq!(binding.binding_type(), "serviceBusTrigger");
        assert_eq!(binding.name().render(), "sbMsg");
        assert_eq!(binding.property("queueName").unwrap(), "jobs");
    }

    #[test]
    fn test_service_bus_trigger_requires_connection() {
        let annotation =
            AnnotationDescriptor::binding("ServiceBusTrigger").with_field("queueName", "jobs");
        let err = ServiceBusTriggerResolver
            .resolve(&annotation, &ServiceDecl::new(""), &FunctionDecl::new("default"))
            .unwrap_err();
        assert!(matches!(err, BindingError::MissingField { ref field, .. } if field == "connection"));
    }

    #[test]
    fn test_service_bus_output() {
        let annotation = AnnotationDescriptor::binding("ServiceBusOutput")
            .with_field("queueName", "done")
            .with_field("connection", "ServiceBusConnection");
        let binding = ServiceBusOutputResolver.resolve(&annotation, 1).unwrap();

        assert_eq!(binding.binding_type(), "serviceBus");
        assert_eq!(binding.name().render(), "outSbMsg1");
    }
}
