//! The host surface a directive transformer works against.

use indexmap::IndexMap;

use crate::{
    resources::{Resource, StackTemplate},
    schema::{FieldDefinition, InputObjectDefinition, Schema, TypeDefinition, DEFAULT_MUTATION_TYPE},
};

/// Lookup and mutation of the schema and its resources while transforming.
pub trait TransformerContext {
    fn get_type(&self, name: &str) -> Option<&TypeDefinition>;

    /// Replace the definition of the same name, or add it.
    fn put_type(&mut self, definition: TypeDefinition);

    fn get_resource(&self, logical_id: &str) -> Option<&Resource>;

    fn set_resource(&mut self, logical_id: &str, resource: Resource);

    fn add_mutation_fields(&mut self, fields: Vec<FieldDefinition>);

    fn add_input(&mut self, input: InputObjectDefinition);

    /// Deploy the resource with the stack of the given name.
    fn map_resource_to_stack(&mut self, stack_name: &str, logical_id: &str);

    fn mutation_type_name(&self) -> &str {
        DEFAULT_MUTATION_TYPE
    }
}

/// An in-memory schema with its resources.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schema: Schema,
    template: StackTemplate,
    stack_mapping: IndexMap<String, String>,
}

impl Registry {
    pub fn new(schema: Schema, template: StackTemplate) -> Self {
        Registry {
            schema,
            template,
            stack_mapping: IndexMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn template(&self) -> &StackTemplate {
        &self.template
    }

    /// Resource logical id to stack name.
    pub fn stack_mapping(&self) -> &IndexMap<String, String> {
        &self.stack_mapping
    }

    pub fn into_parts(self) -> (Schema, StackTemplate, IndexMap<String, String>) {
        (self.schema, self.template, self.stack_mapping)
    }
}

impl TransformerContext for Registry {
    fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.schema.get(name)
    }

    fn put_type(&mut self, definition: TypeDefinition) {
        self.schema.put(definition);
    }

    fn get_resource(&self, logical_id: &str) -> Option<&Resource> {
        self.template.resources.get(logical_id)
    }

    fn set_resource(&mut self, logical_id: &str, resource: Resource) {
        self.template.resources.insert(logical_id.to_owned(), resource);
    }

    fn add_mutation_fields(&mut self, fields: Vec<FieldDefinition>) {
        self.schema.add_mutation_fields(fields);
    }

    fn add_input(&mut self, input: InputObjectDefinition) {
        self.schema.put(TypeDefinition::InputObject(input));
    }

    fn map_resource_to_stack(&mut self, stack_name: &str, logical_id: &str) {
        self.stack_mapping.insert(logical_id.to_owned(), stack_name.to_owned());
    }

    fn mutation_type_name(&self) -> &str {
        self.schema.mutation_type_name()
    }
}
