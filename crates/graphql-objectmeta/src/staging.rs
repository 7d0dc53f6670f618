use indexmap::IndexMap;

use crate::{
    context::TransformerContext,
    resources::Resource,
    schema::{FieldDefinition, InputObjectDefinition, ObjectDefinition, TypeDefinition},
};

#[derive(Debug)]
enum Change {
    PutType(TypeDefinition),
    SetResource(String, Resource),
    AddMutationFields(Vec<FieldDefinition>),
    AddInput(InputObjectDefinition),
    MapResourceToStack { stack_name: String, logical_id: String },
}

/// Records changes on top of another context without touching it.
///
/// Reads see the staged changes. The inner context only receives them, in the order they
/// were made, on [`Staged::commit`]. Dropping a `Staged` discards everything.
pub struct Staged<'a, C: TransformerContext + ?Sized> {
    inner: &'a mut C,
    changes: Vec<Change>,
    types: IndexMap<String, TypeDefinition>,
    resources: IndexMap<String, Resource>,
}

impl<'a, C: TransformerContext + ?Sized> Staged<'a, C> {
    pub fn new(inner: &'a mut C) -> Self {
        Staged {
            inner,
            changes: Vec::new(),
            types: IndexMap::new(),
            resources: IndexMap::new(),
        }
    }

    pub fn commit(self) {
        let Staged { inner, changes, .. } = self;

        tracing::trace!("Committing {} staged changes.", changes.len());

        for change in changes {
            match change {
                Change::PutType(definition) => inner.put_type(definition),
                Change::SetResource(logical_id, resource) => inner.set_resource(&logical_id, resource),
                Change::AddMutationFields(fields) => inner.add_mutation_fields(fields),
                Change::AddInput(input) => inner.add_input(input),
                Change::MapResourceToStack { stack_name, logical_id } => {
                    inner.map_resource_to_stack(&stack_name, &logical_id)
                }
            }
        }
    }
}

impl<C: TransformerContext + ?Sized> TransformerContext for Staged<'_, C> {
    fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name).or_else(|| self.inner.get_type(name))
    }

    fn put_type(&mut self, definition: TypeDefinition) {
        self.types.insert(definition.name().to_owned(), definition.clone());
        self.changes.push(Change::PutType(definition));
    }

    fn get_resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources
            .get(logical_id)
            .or_else(|| self.inner.get_resource(logical_id))
    }

    fn set_resource(&mut self, logical_id: &str, resource: Resource) {
        self.resources.insert(logical_id.to_owned(), resource.clone());
        self.changes.push(Change::SetResource(logical_id.to_owned(), resource));
    }

    fn add_mutation_fields(&mut self, fields: Vec<FieldDefinition>) {
        let mutation_type_name = self.mutation_type_name().to_owned();

        let mut mutation = self
            .get_type(&mutation_type_name)
            .and_then(TypeDefinition::as_object)
            .cloned()
            .unwrap_or_else(|| ObjectDefinition::new(&mutation_type_name));

        mutation.fields.extend(fields.iter().cloned());

        self.types.insert(mutation_type_name, TypeDefinition::Object(mutation));
        self.changes.push(Change::AddMutationFields(fields));
    }

    fn add_input(&mut self, input: InputObjectDefinition) {
        self.types
            .insert(input.name.clone(), TypeDefinition::InputObject(input.clone()));
        self.changes.push(Change::AddInput(input));
    }

    fn map_resource_to_stack(&mut self, stack_name: &str, logical_id: &str) {
        self.changes.push(Change::MapResourceToStack {
            stack_name: stack_name.to_owned(),
            logical_id: logical_id.to_owned(),
        });
    }

    fn mutation_type_name(&self) -> &str {
        self.inner.mutation_type_name()
    }
}
