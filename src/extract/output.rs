//! Output binding construction from return targets

use crate::bindings::{Binding, BindingError, BindingRegistry};
use crate::syntax::ReturnTarget;

/// Resolves a function's return targets to zero or more output bindings.
///
/// Targets resolve in return order; the ordinal passed to each resolver is
/// the index among the bindings produced so far, which keeps slot names
/// unique for composite returns. A target with no binding annotation yields
/// nothing here; the caller supplies any role-specific default.
pub struct OutputBindingBuilder<'a> {
    registry: &'a BindingRegistry,
}

impl<'a> OutputBindingBuilder<'a> {
    pub fn new(registry: &'a BindingRegistry) -> Self {
        Self { registry }
    }

    pub fn build(&self, returns: &[ReturnTarget]) -> Result<Vec<Binding>, BindingError> {
        let mut bindings = Vec::new();
        for target in returns {
            let annotation = match target
                .annotations
                .iter()
                .find(|a| a.is_binding_annotation())
            {
                Some(annotation) => annotation,
                None => continue,
            };

            match self.registry.output(&annotation.name) {
                Some(resolver) => {
                    bindings.push(resolver.resolve(annotation, bindings.len() as u32)?);
                }
                None => {
                    return Err(BindingError::UnsupportedAnnotation(annotation.name.clone()));
                }
            }
        }
        Ok(bindings)
    }
}
