//! CosmosDB trigger, input, and output bindings

use serde_json::{json, Value};

use crate::bindings::registry::{InputResolver, OutputResolver, TriggerResolver};
use crate::bindings::{
    output_slot, required_field, Binding, BindingError, BindingName, Direction,
};
use crate::syntax::{AnnotationDescriptor, FunctionDecl, ServiceDecl};

fn connection_properties(
    annotation: &AnnotationDescriptor,
) -> Result<Vec<(&'static str, Value)>, BindingError> {
    let connection = required_field(annotation, "connectionStringSetting")?;
    let database = required_field(annotation, "databaseName")?;
    let collection = required_field(annotation, "collectionName")?;
    Ok(vec![
        ("connectionStringSetting", json!(connection)),
        ("databaseName", json!(database)),
        ("collectionName", json!(collection)),
    ])
}

pub struct CosmosDbTriggerResolver;

impl TriggerResolver for CosmosDbTriggerResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        _service: &ServiceDecl,
        _function: &FunctionDecl,
    ) -> Result<Binding, BindingError> {
        let mut properties = connection_properties(annotation)?;
        let lease_collection = annotation.field("leaseCollectionName").unwrap_or("leases");
        let create_lease = annotation
            .field("createLeaseCollectionIfNotExists")
            .map(|v| v == "true")
            .unwrap_or(true);
        properties.push(("leaseCollectionName", json!(lease_collection)));
        properties.push(("createLeaseCollectionIfNotExists", json!(create_lease)));

        Ok(Binding::new(
            "cosmosDBTrigger",
            Direction::In,
            BindingName::Slot("inDocuments".to_string()),
            properties,
        ))
    }
}

pub struct CosmosDbInputResolver;

impl InputResolver for CosmosDbInputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        param_name: &str,
    ) -> Result<Binding, BindingError> {
        let mut properties = connection_properties(annotation)?;
        if let Some(query) = annotation.field("sqlQuery") {
            properties.push(("sqlQuery", json!(query)));
        }
        if let Some(id) = annotation.field("id") {
            properties.push(("id", json!(id)));
        }
        if let Some(partition_key) = annotation.field("partitionKey") {
            properties.push(("partitionKey", json!(partition_key)));
        }

        Ok(Binding::new(
            "cosmosDB",
            Direction::In,
            BindingName::Variable(param_name.to_string()),
            properties,
        ))
    }
}

pub struct CosmosDbOutputResolver;

impl OutputResolver for CosmosDbOutputResolver {
    fn resolve(
        &self,
        annotation: &AnnotationDescriptor,
        ordinal: u32,
    ) -> Result<Binding, BindingError> {
        Ok(Binding::new(
            "cosmosDB",
            Direction::Out,
            output_slot("outDoc", ordinal),
            connection_properties(annotation)?,
        ))
    }
}
