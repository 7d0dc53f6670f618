//! Implement the objectmeta directive
//!
//! Flow:
//!  -> When there is an @objectmeta directive on a type
//!  -> Must also carry @model and @auth
//!  -> Arguments resolve to the seven field names and two flags
//!
//! Then:
//!  -> Prepend the snippets to the create and update resolvers
//!  -> Add the soft delete mutation, input and resolver
//!  -> Strip the meta fields from the create and update inputs
//!  -> Check the declared meta fields and add the missing ones

mod fields;
mod inputs;
mod resolvers;
mod snippets;
mod soft_delete;

use self::inputs::Mutation;
use crate::{
    config::TransformerConfig,
    context::{Registry, TransformerContext},
    directive::ObjectMetaDirective,
    names::{self, AUTH_DIRECTIVE, MODEL_DIRECTIVE, OBJECTMETA_DIRECTIVE},
    schema::{Directive, ObjectDefinition},
    staging::Staged,
    template::MappingTemplate,
    Error,
};

/// Applies `@objectmeta` to object types.
#[derive(Debug, Clone, Default)]
pub struct ObjectMetaTransformer {
    config: TransformerConfig,
}

impl ObjectMetaTransformer {
    pub fn new(config: TransformerConfig) -> Self {
        ObjectMetaTransformer { config }
    }

    /// The snippet prepended to create and soft delete requests.
    pub fn create_template(&self, directive: &ObjectMetaDirective) -> MappingTemplate {
        snippets::create(&self.config, directive)
    }

    /// The snippet prepended to update requests.
    pub fn update_template(&self, directive: &ObjectMetaDirective) -> MappingTemplate {
        snippets::update(&self.config, directive)
    }

    /// Transform one object type carrying the directive.
    ///
    /// Nothing is written to `ctx` unless every step succeeds.
    pub fn object<C>(&self, definition: &ObjectDefinition, directive: &Directive, ctx: &mut C) -> Result<(), Error>
    where
        C: TransformerContext + ?Sized,
    {
        for required in [MODEL_DIRECTIVE, AUTH_DIRECTIVE] {
            if !definition.has_directive(required) {
                return Err(Error::InvalidDirective(format!(
                    "Types annotated with @{OBJECTMETA_DIRECTIVE} must also be annotated with @{required}."
                )));
            }
        }

        let directive = ObjectMetaDirective::from_directive(directive)?;
        let type_name = definition.name.as_str();
        let mut staged = Staged::new(ctx);

        let create_snippet = self.create_template(&directive);
        resolvers::prepend_snippet(&mut staged, &names::create_resolver(type_name), &create_snippet)?;

        let update_snippet = self.update_template(&directive);
        resolvers::prepend_snippet(&mut staged, &names::update_resolver(type_name), &update_snippet)?;

        if directive.soft_delete() {
            soft_delete::synthesize(&mut staged, &self.config, type_name, &create_snippet)?;
        }

        inputs::strip_meta_fields(
            &mut staged,
            &directive,
            type_name,
            &names::create_input(type_name),
            Mutation::Create,
        )?;
        inputs::strip_meta_fields(
            &mut staged,
            &directive,
            type_name,
            &names::update_input(type_name),
            Mutation::Update,
        )?;

        fields::enforce_meta_fields(&mut staged, &directive, type_name)?;

        staged.commit();

        Ok(())
    }

    /// Transform every object type of the registry carrying the directive, in definition order.
    ///
    /// On error the registry is left untouched. Returns the names of the transformed types.
    pub fn transform_registry(&self, registry: &mut Registry) -> Result<Vec<String>, Error> {
        let annotated: Vec<(ObjectDefinition, Directive)> = registry
            .schema()
            .objects()
            .filter_map(|object| {
                let directive = object.directive(OBJECTMETA_DIRECTIVE)?;
                Some((object.clone(), directive.clone()))
            })
            .collect();

        if annotated.is_empty() {
            tracing::warn!("No type is annotated with @{OBJECTMETA_DIRECTIVE}.");
        }

        let mut staged = Staged::new(registry);

        for (definition, directive) in &annotated {
            self.object(definition, directive, &mut staged)
                .inspect_err(|err| tracing::debug!("Could not transform `{}`: {err}", definition.name))?;

            tracing::info!("Transformed type `{}`.", definition.name);
        }

        staged.commit();

        Ok(annotated.into_iter().map(|(definition, _)| definition.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{resources::StackTemplate, schema};

    #[test]
    fn co_directives_are_required() {
        let schema = schema::from_sdl(indoc::indoc! {r#"
            type Post @model @objectmeta {
              id: ID!
              title: String
              deleted: Boolean!
            }

            type Comment @auth @objectmeta {
              id: ID!
              deleted: Boolean!
            }
        "#})
        .unwrap();

        let transformer = ObjectMetaTransformer::default();
        let mut registry = Registry::new(schema.clone(), StackTemplate::default());

        for (type_name, missing) in [("Post", "auth"), ("Comment", "model")] {
            let object = schema.object(type_name).unwrap();
            let directive = object.directive("objectmeta").unwrap();

            let error = transformer.object(object, directive, &mut registry).unwrap_err();

            assert!(error.is_configuration());
            assert_eq!(
                error.to_string(),
                format!("Types annotated with @objectmeta must also be annotated with @{missing}.")
            );
        }

        assert_eq!(registry.schema(), &schema);
    }
}
