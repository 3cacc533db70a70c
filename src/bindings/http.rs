//! HTTP trigger and output bindings
//!
//! The HTTP trigger is the only resolver that specializes per function: the
//! route template is built from the service base path plus the function's
//! relative path segments, and the `methods` list comes from the accessor
//! verb. The `default` verb expands to the host's fixed method set.

use serde_json::json;

use crate::bindings::registry::{OutputResolver, TriggerResolver};
use crate::bindings::{Binding, BindingError, BindingName, Direction};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, PathSegment, ServiceDecl};

/// Slot name the host binds the incoming request payload to.
const HTTP_PAYLOAD_SLOT: &str = "httpPayload";

/// Method set emitted for the `default` accessor verb, in this exact order.
const DEFAULT_METHODS: [&str; 6] = ["DELETE", "GET", "HEAD", "OPTIONS", "POST", "PUT"];

pub struct HttpTriggerResolver;

impl TriggerResolver for HttpTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        service: &ServiceDecl,
        function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        let auth_level = annotation.field("authLevel").unwrap_or("anonymous");
        let route = render_route(&service.base_path, &function.path);
        let methods = expand_methods(&function.verb);

        Ok(Binding::new(
            "httpTrigger",
            Direction::In,
            BindingName::Slot(HTTP_PAYLOAD_SLOT.to_string()),
            vec![
                ("authLevel", json!(auth_level)),
                ("methods", json!(methods)),
                ("route", json!(route)),
            ],
        ))
    }
}

pub struct HttpOutputResolver;

impl OutputResolver for HttpOutputResolver {
    fn resolve(
        &self,
        _annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        Ok(http_output(ordinal))
    }
}

/// Builds an HTTP output binding for the given return slot.
///
/// Also used by the extractor to supply the implicit output when a function
/// declares no recognized output target.
pub fn http_output(ordinal: u32) -> Binding {
    Binding::new("http", Direction::Out, BindingName::Return(ordinal), vec![])
}

/// Renders the route template from the base path and the relative segments.
///
/// Segments append in declaration order; the leading slash is stripped so an
/// empty base path renders without one.
fn render_route(base_path: &str, segments: &[PathSegment]) -> String {
    let mut route = String::from(base_path);
    for segment in segments {
        match segment {
            PathSegment::Literal(text) => {
                route.push('/');
                route.push_str(text);
            }
            PathSegment::Param(name) => {
                route.push_str(&format!("/{{{}}}", name));
            }
            PathSegment::CatchAll(name) => {
                route.push_str(&format!("/{{**{}}}", name));
            }
        }
    }
    match route.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => route,
    }
}

fn expand_methods(verb: &str) -> Vec<String> {
    if verb == "default" {
        DEFAULT_METHODS.iter().map(|m| m.to_string()).collect()
    } else {
        vec![verb.to_uppercase()]
    }
}
