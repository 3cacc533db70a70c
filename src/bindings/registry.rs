//! Annotation-name to binding-factory dispatch
//!
//! Each binding kind registers one resolver per role it supports. Dispatch is
//! a plain name lookup, so adding a kind means registering it here and nothing
//! else.

use std::collections::HashMap;

use crate::bindings::{blob, cosmosdb, eventhub, http, queue, servicebus, timer, twilio};
use crate::bindings::{Binding, BindingError};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

/// Resolves a service-level trigger annotation into the trigger binding for
/// one exposed function.
///
/// Resolvers are pure: identical inputs produce identical bindings. Only the
/// HTTP resolver reads the service/function declarations (route and method
/// specialization); the other kinds depend on the annotation alone.
pub trait TriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        service: &ServiceDecl,
        function: &FunctionDecl,
    ) -> Result<Binding, BindingError>;
}

/// Resolves a parameter annotation into an input binding.
pub trait InputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        param_name: &str,
    ) -> Result<Binding, BindingError>;
}

/// Resolves a return-target annotation into an output binding.
pub trait OutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError>;
}

/// Registry mapping annotation names to binding factories, per role.
pub struct BindingRegistry {
    triggers: HashMap<&'static str, Box<dyn TriggerResolver>>,
    inputs: HashMap<&'static str, Box<dyn InputResolver>>,
    outputs: HashMap<&'static str, Box<dyn OutputResolver>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self {
            triggers: HashMap::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    /// Builds a registry with every supported binding kind registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_trigger("HttpTrigger", Box::new(http::HttpTriggerResolver));
        registry.register_trigger("QueueTrigger", Box::new(queue::QueueTriggerResolver));
        registry.register_trigger("BlobTrigger", Box::new(blob::BlobTriggerResolver));
        registry.register_trigger("CosmosDBTrigger", Box::new(cosmosdb::CosmosDbTriggerResolver));
        registry.register_trigger("TimerTrigger", Box::new(timer::TimerTriggerResolver));
        registry.register_trigger("EventHubTrigger", Box::new(eventhub::EventHubTriggerResolver));
        registry.register_trigger(
            "ServiceBusTrigger",
            Box::new(servicebus::ServiceBusTriggerResolver),
        );

        registry.register_input("BlobInput", Box::new(blob::BlobInputResolver));
        registry.register_input("CosmosDBInput", Box::new(cosmosdb::CosmosDbInputResolver));

        registry.register_output("HttpOutput", Box::new(http::HttpOutputResolver));
        registry.register_output("QueueOutput", Box::new(queue::QueueOutputResolver));
        registry.register_output("BlobOutput", Box::new(blob::BlobOutputResolver));
        registry.register_output("CosmosDBOutput", Box::new(cosmosdb::CosmosDbOutputResolver));
        registry.register_output("EventHubOutput", Box::new(eventhub::EventHubOutputResolver));
        registry.register_output(
            "ServiceBusOutput",
            Box::new(servicebus::ServiceBusOutputResolver),
        );
        registry.register_output("TwilioSmsOutput", Box::new(twilio::TwilioSmsOutputResolver));

        registry
    }

    pub fn register_trigger(&mut self, name: &'static str, resolver: Box<dyn TriggerResolver>) {
        self.triggers.insert(name, resolver);
    }

    pub fn register_input(&mut self, name: &'static str, resolver: Box<dyn InputResolver>) {
        self.inputs.insert(name, resolver);
    }

    pub fn register_output(&mut self, name: &'static str, resolver: Box<dyn OutputResolver>) {
        self.outputs.insert(name, resolver);
    }

    pub fn trigger(&self, name: &str) -> Option<&dyn TriggerResolver> {
        self.triggers.get(name).map(Box::as_ref)
    }

    pub fn input(&self, name: &str) -> Option<&dyn InputResolver> {
        self.inputs.get(name).map(Box::as_ref)
    }

    pub fn output(&self, name: &str) -> Option<&dyn OutputResolver> {
        self.outputs.get(name).map(Box::as_ref)
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.contains_key(name)
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
