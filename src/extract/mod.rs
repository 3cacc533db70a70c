//! Service/function extraction
//!
//! Walks the compilation unit in declaration order and assembles one
//! `FunctionContext` per exposed resource function: the trigger binding first,
//! then input bindings in parameter order, then output bindings in return
//! order. The pass is a single synchronous walk; no function's resolution
//! depends on any other's.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::bindings::http::http_output;
use crate::bindings::{Binding, BindingError, BindingRegistry};
use crate::syntax::{AnnotationDescriptor, CompilationUnit, FunctionDecl, ServiceDecl};

pub mod input;
pub mod output;

pub use input::InputBindingBuilder;
pub use output::OutputBindingBuilder;

/// Annotation carrying the mandatory function name.
const FUNCTION_ANNOTATION: &str = "Function";

/// Errors produced while extracting functions from a compilation unit.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    /// The function-level annotation lacks the mandatory `name` field.
    #[error("a function in service '{service}' has no '@af:Function' annotation with a 'name' field")]
    MissingFunctionName { service: String },

    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// One extracted function: its unique name plus the ordered binding list.
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionContext {
    #[serde(skip)]
    function_name: String,
    bindings: Vec<Binding>,
}

impl FunctionContext {
    pub fn new(function_name: impl Into<String>, bindings: Vec<Binding>) -> Self {
        Self {
            function_name: function_name.into(),
            bindings,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

/// Extracts `FunctionContext`s from annotated service declarations.
pub struct ServiceExtractor {
    registry: BindingRegistry,
}

impl ServiceExtractor {
    pub fn new() -> Self {
        Self {
            registry: BindingRegistry::with_defaults(),
        }
    }

    pub fn with_registry(registry: BindingRegistry) -> Self {
        Self { registry }
    }

    /// Walks every service in declaration order.
    pub fn extract(&self, unit: &CompilationUnit) -> Result<Vec<FunctionContext>, ExtractError> {
        let mut contexts = Vec::new();
        for service in &unit.services {
            self.extract_service(service, &mut contexts)?;
        }
        Ok(contexts)
    }

    fn extract_service(
        &self,
        service: &ServiceDecl,
        contexts: &mut Vec<FunctionContext>,
    ) -> Result<(), ExtractError> {
        let trigger_annotation = self.trigger_annotation(service)?;
        debug!(
            service = %service.base_path,
            trigger = %trigger_annotation,
            functions = service.functions.len(),
            "extracting service"
        );

        for function in &service.functions {
            let context = self.extract_function(service, function, &trigger_annotation)?;
            contexts.push(context);
        }
        Ok(())
    }

    fn extract_function(
        &self,
        service: &ServiceDecl,
        function: &FunctionDecl,
        trigger_annotation: &AnnotationDescriptor,
    ) -> Result<FunctionContext, ExtractError> {
        let resolver = self
            .registry
            .trigger(&trigger_annotation.name)
            .ok_or_else(|| BindingError::UnsupportedAnnotation(trigger_annotation.name.clone()))?;

        let mut bindings = Vec::new();
        bindings.push(resolver.resolve(trigger_annotation, service, function)?);

        let input_builder = InputBindingBuilder::new(&self.registry);
        for param in &function.params {
            if let Some(binding) = input_builder.build(param)? {
                bindings.push(binding);
            }
        }

        let output_builder = OutputBindingBuilder::new(&self.registry);
        let outputs = output_builder.build(&function.returns)?;
        if outputs.is_empty() && trigger_annotation.name == "HttpTrigger" {
            // Role-specific default: the return value flows to the HTTP response.
            bindings.push(http_output(0));
        } else {
            bindings.extend(outputs);
        }

        let function_name =
            function_name(function).ok_or_else(|| ExtractError::MissingFunctionName {
                service: service.base_path.clone(),
            })?;
        debug!(
            function = %function_name,
            bindings = bindings.len(),
            "resolved function"
        );

        Ok(FunctionContext::new(function_name, bindings))
    }

    /// Picks the service-level trigger annotation.
    ///
    /// The first binding-module annotation decides: a registered trigger kind
    /// is used as-is, anything else is unsupported. Services without a
    /// binding annotation default to an HTTP trigger.
    fn trigger_annotation(
        &self,
        service: &ServiceDecl,
    ) -> Result<AnnotationDescriptor, BindingError> {
        for annotation in &service.annotations {
            if !annotation.is_binding_annotation() {
                continue;
            }
            if self.registry.has_trigger(&annotation.name) {
                return Ok(annotation.clone());
            }
            return Err(BindingError::UnsupportedAnnotation(annotation.name.clone()));
        }
        Ok(AnnotationDescriptor::binding("HttpTrigger"))
    }
}

impl Default for ServiceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn function_name(function: &FunctionDecl) -> Option<String> {
    function
        .annotations
        .iter()
        .filter(|a| a.is_binding_annotation() && a.name == FUNCTION_ANNOTATION)
        .find_map(|a| a.field("name"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Direction;
    use crate::syntax::{Parameter, PathSegment, ReturnTarget};

    fn http_service() -> ServiceDecl {
        ServiceDecl::new("/api").with_function(FunctionDecl::new("get").with_name("hello"))
    }

    #[test]
    fn test_hello_end_to_end_bindings() {
        let unit = CompilationUnit {
            services: vec![http_service()],
        };
        let contexts = ServiceExtractor::new().extract(&unit).unwrap();

        assert_eq!(contexts.len(), 1);
        let context = &contexts[0];
        assert_eq!(context.function_name(), "hello");

        let bindings = context.bindings();
        assert_eq!(bindings.len(), 2);

        let trigger = &bindings[0];
        assert_eq!(trigger.binding_type(), "httpTrigger");
        assert_eq!(trigger.direction(), Direction::In);
        assert_eq!(trigger.property("authLevel").unwrap(), "anonymous");
        assert_eq!(trigger.property("methods").unwrap(), &serde_json::json!(["GET"]));
        assert_eq!(trigger.property("route").unwrap(), "api");

        let output = &bindings[1];
        assert_eq!(output.binding_type(), "http");
        assert_eq!(output.direction(), Direction::Out);
        assert_eq!(output.name().render(), "$return");
    }

    #[test]
    fn test_binding_order_trigger_inputs_outputs() {
        let function = FunctionDecl::new("post")
            .with_name("enrich")
            .with_segment(PathSegment::Param("id".into()))
            .with_param(Parameter::new("payload"))
            .with_param(
                Parameter::new("user").with_annotation(
                    AnnotationDescriptor::binding("CosmosDBInput")
                        .with_field("connectionStringSetting", "CosmosConnection")
                        .with_field("databaseName", "db")
                        .with_field("collectionName", "users"),
                ),
            )
            .with_return(ReturnTarget::annotated(
                AnnotationDescriptor::binding("QueueOutput").with_field("queueName", "enriched"),
            ));
        let unit = CompilationUnit {
            services: vec![ServiceDecl::new("/api").with_function(function)],
        };

        let contexts = ServiceExtractor::new().extract(&unit).unwrap();
        let types: Vec<&str> = contexts[0]
            .bindings()
            .iter()
            .map(|b| b.binding_type())
            .collect();
        assert_eq!(types, vec!["httpTrigger", "cosmosDB", "queue"]);
        // The plain `payload` parameter stays untouched.
        assert_eq!(contexts[0].bindings()[1].name().render(), "user");
    }

    #[test]
    fn test_queue_service_trigger_from_annotation() {
        let service = ServiceDecl::new("")
            .with_annotation(
                AnnotationDescriptor::binding("QueueTrigger").with_field("queueName", "orders"),
            )
            .with_function(FunctionDecl::new("default").with_name("onOrder"));
        let unit = CompilationUnit {
            services: vec![service],
        };

        let contexts = ServiceExtractor::new().extract(&unit).unwrap();
        let bindings = contexts[0].bindings();
        // Non-HTTP triggers get no implicit output binding.
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].binding_type(), "queueTrigger");
    }

    #[test]
    fn test_unsupported_service_annotation() {
        let service = ServiceDecl::new("")
            .with_annotation(AnnotationDescriptor::binding("KafkaTrigger"))
            .with_function(FunctionDecl::new("default").with_name("consume"));
        let unit = CompilationUnit {
            services: vec![service],
        };

        let err = ServiceExtractor::new().extract(&unit).unwrap_err();
        assert_eq!(
            err,
            ExtractError::Binding(BindingError::UnsupportedAnnotation(
                "KafkaTrigger".to_string()
            ))
        );
    }

    #[test]
    fn test_missing_function_name_is_fatal() {
        let unit = CompilationUnit {
            services: vec![ServiceDecl::new("/api").with_function(FunctionDecl::new("get"))],
        };
        let err = ServiceExtractor::new().extract(&unit).unwrap_err();
        assert_eq!(
            err,
            ExtractError::MissingFunctionName {
                service: "/api".to_string()
            }
        );
    }

    #[test]
    fn test_non_binding_function_annotation_is_not_a_name_source() {
        let function = FunctionDecl::new("get").with_annotation(AnnotationDescriptor {
            module: Some("docs".to_string()),
            name: "Function".to_string(),
            fields: vec![],
        });
        let unit = CompilationUnit {
            services: vec![ServiceDecl::new("/api").with_function(function)],
        };
        assert!(ServiceExtractor::new().extract(&unit).is_err());
    }

    #[test]
    fn test_services_processed_in_declaration_order() {
        let unit = CompilationUnit {
            services: vec![
                ServiceDecl::new("/a").with_function(FunctionDecl::new("get").with_name("first")),
                ServiceDecl::new("/b").with_function(FunctionDecl::new("get").with_name("second")),
            ],
        };
        let contexts = ServiceExtractor::new().extract(&unit).unwrap();
        let names: Vec<&str> = contexts.iter().map(|c| c.function_name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
