use crate::{
    config::TransformerConfig,
    context::TransformerContext,
    names,
    resources::{get_att, Resolver, ResolverProperties},
    schema::{FieldDefinition, InputObjectDefinition, InputValueDefinition, TypeRef},
    template::MappingTemplate,
    Error,
};

/// Add `softDelete<T>(id: ID!): T` to the mutation type, with an input type and a resolver
/// built on top of the update resolver of the type.
pub(super) fn synthesize<C>(
    ctx: &mut C,
    config: &TransformerConfig,
    type_name: &str,
    snippet: &MappingTemplate,
) -> Result<(), Error>
where
    C: TransformerContext + ?Sized,
{
    let update_resolver_id = names::update_resolver(type_name);

    let (update_request, update_response) = {
        let update_resolver = ctx
            .get_resource(&update_resolver_id)
            .ok_or_else(|| Error::MissingResolver {
                type_name: type_name.to_owned(),
                resource: update_resolver_id.clone(),
            })?
            .as_resolver()
            .ok_or_else(|| Error::MissingRequestTemplate {
                resource: update_resolver_id.clone(),
            })?;

        let request = update_resolver
            .request_mapping_template()
            .ok_or_else(|| Error::MissingRequestTemplate {
                resource: update_resolver_id.clone(),
            })?
            .to_owned();

        (request, update_resolver.response_mapping_template().map(str::to_owned))
    };

    let input_name = names::soft_delete_input(type_name);

    if ctx.get_type(&input_name).is_none() {
        ctx.add_input(InputObjectDefinition::new(&input_name, vec![id_argument()]));
    } else {
        tracing::debug!("`{input_name}` already exists, keeping it.");
    }

    let field_name = names::soft_delete_mutation(type_name);

    let mutation = FieldDefinition::new(&field_name, TypeRef::named(type_name)).with_arguments(vec![id_argument()]);
    ctx.add_mutation_fields(vec![mutation]);

    let resolver = Resolver::new(ResolverProperties {
        api_id: get_att(&config.api_logical_id, "ApiId"),
        data_source_name: Some(get_att(&names::data_source(type_name), "Name")),
        type_name: ctx.mutation_type_name().to_owned(),
        field_name,
        request_mapping_template: Some(format!("{snippet}\n{update_request}")),
        response_mapping_template: update_response,
        other: Default::default(),
    });

    let resolver_id = names::soft_delete_resolver(type_name);

    ctx.set_resource(&resolver_id, resolver.into());
    ctx.map_resource_to_stack(type_name, &resolver_id);

    tracing::debug!("Added the soft delete mutation `{resolver_id}` for `{type_name}`.");

    Ok(())
}

fn id_argument() -> InputValueDefinition {
    InputValueDefinition::new(names::INPUT_FIELD_ID, TypeRef::named(names::ID_TYPE).non_null())
}
