use crate::{
    context::TransformerContext,
    directive::{MetaField, ObjectMetaDirective},
    schema::{FieldDefinition, TypeDefinition},
    Error,
};

/// Check the meta fields declared on the type and append the missing ones.
pub(super) fn enforce_meta_fields<C>(ctx: &mut C, directive: &ObjectMetaDirective, type_name: &str) -> Result<(), Error>
where
    C: TransformerContext + ?Sized,
{
    let Some(object) = ctx.get_type(type_name).and_then(TypeDefinition::as_object) else {
        return Ok(());
    };

    let identity_required = directive.identity_required();
    let mut synthesized: Vec<FieldDefinition> = Vec::new();

    for meta_field in MetaField::ALL {
        let field_name = directive.field_name(meta_field);
        let expected = meta_field.expected_type(identity_required);

        // Two meta fields may share a name.
        let declared = object
            .field(field_name)
            .or_else(|| synthesized.iter().find(|field| field.name == field_name));

        match declared {
            Some(field) if meta_field.accepts(&field.ty, identity_required) => {}
            None if meta_field.is_synthesized() => {
                synthesized.push(FieldDefinition::new(field_name, expected));
            }
            _ => {
                return Err(Error::Contract(format!(
                    "Type \"{type_name}\" requires {} \"{field_name}\" to be of type \"{expected}\".",
                    meta_field.argument_name()
                )));
            }
        }
    }

    if synthesized.is_empty() {
        return Ok(());
    }

    tracing::debug!(
        "Adding {} to `{type_name}`.",
        synthesized
            .iter()
            .map(|field| field.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut object = object.clone();
    object.fields.extend(synthesized);
    ctx.put_type(TypeDefinition::Object(object));

    Ok(())
}
