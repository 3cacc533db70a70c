//! Timer trigger binding

use serde_json::json;

use crate::bindings::registry::TriggerResolver;
use crate::bindings::{required_field, Binding, BindingError, BindingName, Direction};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

pub struct TimerTriggerResolver;

impl TriggerResolver for TimerTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        _service: &ServiceDecl,
        _function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        let schedule = required_field(annotation, "schedule")?;
        let run_on_startup = annotation
            .field("runOnStartup")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Binding::new(
            "timerTrigger",
            Direction::In,
            BindingName::Slot("timerInfo".to_string()),
            vec![
                ("schedule", json!(schedule)),
                ("runOnStartup", json!(run_on_startup)),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_trigger() {
        let annotation =
            AnnotationDescriptor::binding("TimerTrigger").with_field("schedule", "0 */5 * * * *");
        let binding = TimerTriggerResolver
            .resolve(&annotation, &ServiceDecl::new(""), &FunctionDecl::new("default"))
            .unwrap();

        assert_eq!(binding.binding_type(), "timerTrigger");
        assert_eq!(binding.name().render(), "timerInfo");
        assert_eq!(binding.property("schedule").unwrap(), "0 */5 * * * *");
        assert_eq!(binding.property("runOnStartup").unwrap(), &json!(false));
    }

    #[test]
    fn test_timer_trigger_run_on_startup() {
        let annotation = AnnotationDescriptor::binding("TimerTrigger")
            .with_field("schedule", "0 0 * * * *")
            .with_field("runOnStartup", "true");
        let binding = TimerTriggerResolver
            .resolve(&annotation, &ServiceDecl::new(""), &FunctionDecl::new("default"))
            .unwrap();
        assert_eq!(binding.property("runOnStartup").unwrap(), &json!(true));
    }

    #[test]
    fn test_timer_trigger_missing_schedule() {
        let annotation = AnnotationDescriptor::binding("TimerTrigger");
        let err = TimerTriggerResolver
            .resolve(&annotation, &ServiceDecl::new(""), &FunctionDecl::new("default"))
            .unwrap_err();
        assert!(matches!(err, BindingError::MissingField { ref field, .. } if field == "schedule"));
    }
}
