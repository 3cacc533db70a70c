//! Front-end contract types
//!
//! The code generator does not parse source text itself. An external front end
//! hands over a materialized view of the syntax tree: service declarations,
//! their exposed resource functions, parameter lists, return targets, and the
//! annotations attached to each of them. Everything in this module is plain
//! data with a serde contract, so a front end can serialize the view as JSON
//! and feed it to the `funcgen` binary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Module qualifier that marks an annotation as a binding annotation.
pub const BINDING_MODULE: &str = "af";

/// One `field: value` pair inside an annotation body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationField {
    pub name: String,
    pub value: String,
}

/// An annotation attached to a service, function, parameter, or return target.
///
/// Fields keep their declaration order; lookups scan the list so duplicate
/// fields resolve to the first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDescriptor {
    /// Module qualifier, e.g. `af` in `@af:QueueTrigger`. Annotations without
    /// a qualifier can never be binding annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<AnnotationField>,
}

impl AnnotationDescriptor {
    /// Creates a binding-module annotation with no fields.
    pub fn binding(name: impl Into<String>) -> Self {
        Self {
            module: Some(BINDING_MODULE.to_string()),
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(AnnotationField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// True when the annotation lives in the binding module.
    pub fn is_binding_annotation(&self) -> bool {
        self.module.as_deref() == Some(BINDING_MODULE)
    }

    /// Looks up a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

impl fmt::Display for AnnotationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "@{}:{}", module, self.name),
            None => write!(f, "@{}", self.name),
        }
    }
}

/// One token of a resource path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PathSegment {
    /// Plain segment, appended as-is.
    Literal(String),
    /// Named parameter, rendered `{name}`.
    Param(String),
    /// Trailing catch-all, rendered `{**name}`.
    CatchAll(String),
}

/// A function parameter together with its annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// One target of a function's return value.
///
/// A function returning a composite of several output targets declares one
/// entry per target, in return order. A plain return type is a single target
/// with no annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnTarget {
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
}

impl ReturnTarget {
    pub fn annotated(annotation: AnnotationDescriptor) -> Self {
        Self {
            annotations: vec![annotation],
        }
    }
}

/// An exposed resource function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDecl {
    /// Accessor verb (`get`, `post`, ...) or the sentinel `default`.
    pub verb: String,
    /// Relative resource path, in declaration order.
    #[serde(default)]
    pub path: Vec<PathSegment>,
    /// Function-level annotations; the `@af:Function` annotation carries the
    /// mandatory `name` field.
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Return targets in return order; empty for functions with no declared
    /// return type.
    #[serde(default)]
    pub returns: Vec<ReturnTarget>,
}

impl FunctionDecl {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: Vec::new(),
            annotations: Vec::new(),
            params: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with_annotation(AnnotationDescriptor::binding("Function").with_field("name", name))
    }

    pub fn with_annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_segment(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_return(mut self, target: ReturnTarget) -> Self {
        self.returns.push(target);
        self
    }
}

/// A service declaration with its exposed functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDecl {
    /// Absolute base path of the service, e.g. `/api`. May be empty.
    #[serde(default)]
    pub base_path: String,
    /// Service-level annotations; at most one trigger annotation is honored.
    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,
    #[serde(default)]
    pub functions: Vec<FunctionDecl>,
}

impl ServiceDecl {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            annotations: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }
}

/// The full compilation unit handed over by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default)]
    pub services: Vec<ServiceDecl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_field_lookup() {
        let annotation = AnnotationDescriptor::binding("QueueTrigger")
            .with_field("queueName", "orders")
            .with_field("connection", "MyStorage");

        assert_eq!(annotation.field("queueName"), Some("orders"));
        assert_eq!(annotation.field("connection"), Some("MyStorage"));
        assert_eq!(annotation.field("missing"), None);
    }

    #[test]
    fn test_binding_module_detection() {
        assert!(AnnotationDescriptor::binding("QueueOutput").is_binding_annotation());

        let other = AnnotationDescriptor {
            module: Some("http".to_string()),
            name: "Header".to_string(),
            fields: Vec::new(),
        };
        assert!(!other.is_binding_annotation());

        let unqualified = AnnotationDescriptor {
            module: None,
            name: "display".to_string(),
            fields: Vec::new(),
        };
        assert!(!unqualified.is_binding_annotation());
    }

    #[test]
    fn test_annotation_display() {
        let annotation = AnnotationDescriptor::binding("TimerTrigger");
        assert_eq!(annotation.to_string(), "@af:TimerTrigger");
    }

    #[test]
    fn test_path_segment_json_contract() {
        let segments = vec![
            PathSegment::Literal("orders".to_string()),
            PathSegment::Param("id".to_string()),
            PathSegment::CatchAll("rest".to_string()),
        ];
        let json = serde_json::to_value(&segments).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"kind": "literal", "value": "orders"},
                {"kind": "param", "value": "id"},
                {"kind": "catchAll", "value": "rest"}
            ])
        );
    }

    #[test]
    fn test_compilation_unit_from_json_defaults() {
        let unit: CompilationUnit = serde_json::from_str(
            r#"{"services": [{"basePath": "/api", "functions": [{"verb": "get"}]}]}"#,
        )
        .unwrap();

        assert_eq!(unit.services.len(), 1);
        let service = &unit.services[0];
        assert_eq!(service.base_path, "/api");
        assert!(service.annotations.is_empty());
        assert_eq!(service.functions[0].verb, "get");
        assert!(service.functions[0].returns.is_empty());
    }
}
