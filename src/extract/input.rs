//! Input binding construction from parameter annotations

use crate::bindings::{Binding, BindingError, BindingRegistry};
use crate::syntax::Parameter;

/// Resolves a parameter's annotation list to at most one input binding.
///
/// Only the first binding-module annotation is considered. A parameter with
/// no binding annotation is an ordinary parameter and yields no binding; a
/// binding annotation of an unregistered kind fails fast.
pub struct InputBindingBuilder<'a> {
    registry: &'a BindingRegistry,
}

impl<'a> InputBindingBuilder<'a> {
    pub fn new(registry: &'a BindingRegistry) -> Self {
        Self { registry }
    }

    pub fn build(&self, param: &Parameter) -> Result<Option<Binding>, BindingError> {
        let annotation = match param
            .annotations
            .iter()
            .find(|a| a.is_binding_annotation())
        {
            Some(annotation) => annotation,
            None => return Ok(None),
        };

        match self.registry.input(&annotation.name) {
            Some(resolver) => resolver.resolve(annotation, &param.name).map(Some),
            None => Err(BindingError::UnsupportedAnnotation(annotation.name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::AnnotationDescriptor;

    fn builder_test<T>(check: impl FnOnce(InputBindingBuilder<'_>) -> T) -> T {
        let registry = BindingRegistry::with_defaults();
        check(InputBindingBuilder::new(&registry))
    }

    #[test]
    fn test_plain_parameter_yields_no_binding() {
        builder_test(|builder| {
            let param = Parameter::new("payload");
            assert_eq!(builder.build(&param).unwrap(), None);
        });
    }

    #[test]
    fn test_foreign_module_annotation_is_ignored() {
        builder_test(|builder| {
            let param = Parameter::new("header").with_annotation(AnnotationDescriptor {
                module: Some("http".to_string()),
                name: "Header".to_string(),
                fields: vec![],
            });
            assert_eq!(builder.build(&param).unwrap(), None);
        });
    }

    #[test]
    fn test_blob_input_resolves() {
        builder_test(|builder| {
            let param = Parameter::new("document").with_annotation(
                AnnotationDescriptor::binding("BlobInput").with_field("path", "docs/{id}"),
            );
            let binding = builder.build(&param).unwrap().unwrap();
            assert_eq!(binding.binding_type(), "blob");
            assert_eq!(binding.name().render(), "document");
        });
    }

    #[test]
    fn test_unknown_binding_annotation_fails() {
        builder_test(|builder| {
            let param = Parameter::new("doc")
                .with_annotation(AnnotationDescriptor::binding("TableInput"));
            let err = builder.build(&param).unwrap_err();
            assert_eq!(
                err,
                BindingError::UnsupportedAnnotation("TableInput".to_string())
            );
        });
    }
}
