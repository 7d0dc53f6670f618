use crate::{
    context::TransformerContext, directive::ObjectMetaDirective, schema::TypeDefinition, Error,
};

#[derive(Debug, Clone, Copy)]
pub(super) enum Mutation {
    Create,
    Update,
}

impl Mutation {
    fn as_str(self) -> &'static str {
        match self {
            Mutation::Create => "create",
            Mutation::Update => "update",
        }
    }
}

/// Remove the meta fields from a generated mutation input, so that clients cannot set them.
pub(super) fn strip_meta_fields<C>(
    ctx: &mut C,
    directive: &ObjectMetaDirective,
    type_name: &str,
    input_name: &str,
    mutation: Mutation,
) -> Result<(), Error>
where
    C: TransformerContext + ?Sized,
{
    let Some(input) = ctx.get_type(input_name).and_then(TypeDefinition::as_input_object) else {
        return Ok(());
    };

    let mut input = input.clone();
    let before = input.fields.len();

    input.fields.retain(|field| !directive.is_meta_field(&field.name));

    if input.fields.is_empty() {
        let field_names = directive
            .field_names()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ");

        return Err(Error::InvalidDirective(format!(
            "After stripping away object meta fields {field_names}, the {} input for type \"{type_name}\" \
             cannot be created with 0 fields. Add another field to type \"{type_name}\" to continue.",
            mutation.as_str()
        )));
    }

    tracing::debug!(
        "Stripped {} meta fields from `{input_name}`.",
        before - input.fields.len()
    );

    ctx.put_type(TypeDefinition::InputObject(input));

    Ok(())
}
