use crate::{
    config::TransformerConfig,
    directive::{MetaField, ObjectMetaDirective},
    template::{InputValue, MappingTemplate, Statement},
};

/// The snippet prepended to create requests, also used for soft deletes.
pub(super) fn create(config: &TransformerConfig, directive: &ObjectMetaDirective) -> MappingTemplate {
    let mut statements = identity(config, directive);

    statements.extend(touch(directive, MetaField::CreatedAt, MetaField::CreatedBy));
    statements.extend(touch(directive, MetaField::UpdatedAt, MetaField::UpdatedBy));
    statements.push(put(directive, MetaField::Deleted, InputValue::Bool(false)));

    MappingTemplate::new(&config.snippet_block_name, statements)
}

/// The snippet prepended to update requests.
///
/// Creation metadata is rewritten on every update, and an input setting the soft delete
/// flag has it reset while the deletion time and actor are recorded.
pub(super) fn update(config: &TransformerConfig, directive: &ObjectMetaDirective) -> MappingTemplate {
    let mut statements = identity(config, directive);

    statements.extend(touch(directive, MetaField::CreatedAt, MetaField::CreatedBy));
    statements.extend(touch(directive, MetaField::UpdatedAt, MetaField::UpdatedBy));
    statements.push(Statement::WhenInputTrue {
        field: directive.field_name(MetaField::Deleted).to_owned(),
        then: vec![
            put(directive, MetaField::Deleted, InputValue::Bool(false)),
            put(directive, MetaField::DeletedAt, InputValue::Now),
            put(directive, MetaField::DeletedBy, InputValue::Identity),
        ],
    });

    MappingTemplate::new(&config.snippet_block_name, statements)
}

fn identity(config: &TransformerConfig, directive: &ObjectMetaDirective) -> Vec<Statement> {
    let resolve = Statement::ResolveIdentity {
        claims: config.identity_claims.clone(),
        fallback: (!directive.identity_required()).then(|| config.missing_identity_value.clone()),
    };

    if directive.identity_required() {
        vec![resolve, Statement::RequireIdentity]
    } else {
        vec![resolve]
    }
}

/// Set a time field to now and an actor field to the identity.
fn touch(directive: &ObjectMetaDirective, at: MetaField, by: MetaField) -> [Statement; 2] {
    [put(directive, at, InputValue::Now), put(directive, by, InputValue::Identity)]
}

fn put(directive: &ObjectMetaDirective, field: MetaField, value: InputValue) -> Statement {
    Statement::PutInput {
        field: directive.field_name(field).to_owned(),
        value,
    }
}
