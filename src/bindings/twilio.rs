//! Twilio SMS output binding

use serde_json::json;

use crate::bindings::registry::OutputResolver;
use crate::bindings::{field_or, output_slot, required_field, Binding, BindingError, Direction};
use crate::syntax::AnnotationDescriptor;

const DEFAULT_ACCOUNT_SID_SETTING: &str = "AzureWebJobsTwilioAccountSid";
const DEFAULT_AUTH_TOKEN_SETTING: &str = "AzureWebJobsTwilioAuthToken";

pub struct TwilioSmsOutputResolver;

impl OutputResolver for TwilioSmsOutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        let from = required_field(annotation, "from")?;
        let account_sid = field_or(annotation, "accountSidSetting", DEFAULT_ACCOUNT_SID_SETTING);
        let auth_token = field_or(annotation, "authTokenSetting", DEFAULT_AUTH_TOKEN_SETTING);

        let mut properties = vec![
            ("accountSidSetting", json!(account_sid)),
            ("authTokenSetting", json!(auth_token)),
            ("from", json!(from)),
        ];
        if let Some(to) = annotation.field("to") {
            properties.push(("to", json!(to)));
        }

        Ok(Binding::new(
            "twilioSms",
            Direction::Out,
            output_slot("outSms", ordinal),
            properties,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twilio_output_defaults() {
        let annotation =
            AnnotationDescriptor::binding("TwilioSmsOutput").with_field("from", "+15551234567");
        let binding = TwilioSmsOutputResolver.resolve(&annotation, 0).unwrap();

        assert_eq!(binding.binding_type(), "twilioSms");
        assert_eq!(binding.direction(), Direction::Out);
        assert_eq!(binding.name().render(), "outSms");
        assert_eq!(
            binding.property("accountSidSetting").unwrap(),
            DEFAULT_ACCOUNT_SID_SETTING
        );
        assert_eq!(
            binding.property("authTokenSetting").unwrap(),
            DEFAULT_AUTH_TOKEN_SETTING
        );
        assert!(binding.property("to").is_none());
    }

    #[test]
    fn test_twilio_output_with_recipient() {
        let annotation = AnnotationDescriptor::binding("TwilioSmsOutput")
            .with_field("from", "+15551234567")
            .with_field("to", "+15559876543");
        let binding = TwilioSmsOutputResolver.resolve(&annotation, 0).unwrap();
        assert_eq!(binding.property("to").unwrap(), "+15559876543");
    }

    #[test]
    fn test_twilio_output_requires_from() {
        let annotation = AnnotationDescriptor::binding("TwilioSmsOutput");
        let err = TwilioSmsOutputResolver.resolve(&annotation, 0).unwrap_err();
        assert!(matches!(err, BindingError::MissingField { ref field, .. } if field == "from"));
    }
}
