use crate::{
    context::TransformerContext,
    resources::{Resolver, Resource},
    template::MappingTemplate,
    Error,
};

/// Prepend the snippet to the request mapping template of a generated resolver.
///
/// A resolver that was not generated is skipped. Returns whether the resolver was found.
pub(super) fn prepend_snippet<C>(ctx: &mut C, logical_id: &str, snippet: &MappingTemplate) -> Result<bool, Error>
where
    C: TransformerContext + ?Sized,
{
    let Some(resource) = ctx.get_resource(logical_id) else {
        tracing::warn!("No resolver `{logical_id}` to augment, skipping it.");
        return Ok(false);
    };

    let Resource::Resolver(resolver) = resource else {
        return Err(Error::MissingRequestTemplate {
            resource: logical_id.to_owned(),
        });
    };

    let mut resolver = Resolver::clone(resolver);

    let Some(existing) = resolver.properties.request_mapping_template.take() else {
        return Err(Error::MissingRequestTemplate {
            resource: logical_id.to_owned(),
        });
    };

    resolver.properties.request_mapping_template = Some(format!("{snippet}\n\n{existing}"));
    ctx.set_resource(logical_id, resolver.into());

    tracing::debug!("Augmented the request mapping template of `{logical_id}`.");

    Ok(true)
}
