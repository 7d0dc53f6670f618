use cynic_parser::{common::WrappingType, type_system as ast, values::ConstValue};

use super::*;
use crate::Error;

/// Parse an SDL document into an owned [`Schema`].
pub fn from_sdl(sdl: &str) -> Result<Schema, Error> {
    let document = cynic_parser::parse_type_system_document(sdl).map_err(|err| Error::Parse(err.to_string()))?;
    let mut schema = Schema::default();

    for definition in document.definitions() {
        match definition {
            ast::Definition::Schema(schema_definition) => {
                schema.schema_definition = Some(ingest_schema_definition(schema_definition));
            }
            ast::Definition::SchemaExtension(schema_extension) => {
                // Extensions only ever add root operation types or directives.
                let extension = ingest_schema_definition(schema_extension);
                let target = schema.schema_definition.get_or_insert_with(Default::default);

                target.directives.extend(extension.directives);
                target.query = target.query.take().or(extension.query);
                target.mutation = target.mutation.take().or(extension.mutation);
                target.subscription = target.subscription.take().or(extension.subscription);
            }
            ast::Definition::Directive(directive_definition) => {
                schema
                    .directive_definitions
                    .push(ingest_directive_definition(directive_definition));
            }
            ast::Definition::Type(typedef) => {
                let definition = ingest_type_definition(typedef);

                if schema.types.contains_key(definition.name()) {
                    return Err(Error::Parse(format!(
                        "The type `{}` is defined more than once.",
                        definition.name()
                    )));
                }

                schema.put(definition);
            }
            ast::Definition::TypeExtension(typedef) => {
                schema.extensions.push(ingest_type_definition(typedef));
            }
        }
    }

    Ok(schema)
}

fn ingest_schema_definition(schema: ast::SchemaDefinition<'_>) -> SchemaDefinition {
    SchemaDefinition {
        directives: ingest_directives(schema.directives()),
        query: schema.query_type().map(|query| query.named_type().to_owned()),
        mutation: schema.mutation_type().map(|mutation| mutation.named_type().to_owned()),
        subscription: schema
            .subscription_type()
            .map(|subscription| subscription.named_type().to_owned()),
    }
}

fn ingest_directive_definition(directive_definition: ast::DirectiveDefinition<'_>) -> DirectiveDefinition {
    let locations = directive_definition
        .locations()
        .map(|location| match location {
            ast::DirectiveLocation::Query => DirectiveLocation::Query,
            ast::DirectiveLocation::Mutation => DirectiveLocation::Mutation,
            ast::DirectiveLocation::Subscription => DirectiveLocation::Subscription,
            ast::DirectiveLocation::Field => DirectiveLocation::Field,
            ast::DirectiveLocation::FragmentDefinition => DirectiveLocation::FragmentDefinition,
            ast::DirectiveLocation::FragmentSpread => DirectiveLocation::FragmentSpread,
            ast::DirectiveLocation::InlineFragment => DirectiveLocation::InlineFragment,
            ast::DirectiveLocation::VariableDefinition => DirectiveLocation::VariableDefinition,
            ast::DirectiveLocation::Schema => DirectiveLocation::Schema,
            ast::DirectiveLocation::Scalar => DirectiveLocation::Scalar,
            ast::DirectiveLocation::Object => DirectiveLocation::Object,
            ast::DirectiveLocation::FieldDefinition => DirectiveLocation::FieldDefinition,
            ast::DirectiveLocation::ArgumentDefinition => DirectiveLocation::ArgumentDefinition,
            ast::DirectiveLocation::Interface => DirectiveLocation::Interface,
            ast::DirectiveLocation::Union => DirectiveLocation::Union,
            ast::DirectiveLocation::Enum => DirectiveLocation::Enum,
            ast::DirectiveLocation::EnumValue => DirectiveLocation::EnumValue,
            ast::DirectiveLocation::InputObject => DirectiveLocation::InputObject,
            ast::DirectiveLocation::InputFieldDefinition => DirectiveLocation::InputFieldDefinition,
        })
        .collect();

    DirectiveDefinition {
        name: directive_definition.name().to_owned(),
        arguments: directive_definition
            .arguments()
            .map(ingest_input_value_definition)
            .collect(),
        repeatable: directive_definition.is_repeatable(),
        locations,
    }
}

fn ingest_type_definition(typedef: ast::TypeDefinition<'_>) -> TypeDefinition {
    let name = typedef.name().to_owned();
    let description = typedef.description().map(|description| description.to_cow().into_owned());
    let directives = ingest_directives(typedef.directives());

    match typedef {
        ast::TypeDefinition::Scalar(_) => TypeDefinition::Scalar(ScalarDefinition {
            description,
            name,
            directives,
        }),
        ast::TypeDefinition::Object(object) => TypeDefinition::Object(ObjectDefinition {
            description,
            name,
            implements_interfaces: object.implements_interfaces().map(str::to_owned).collect(),
            directives,
            fields: object.fields().map(ingest_field_definition).collect(),
        }),
        ast::TypeDefinition::Interface(interface) => TypeDefinition::Interface(ObjectDefinition {
            description,
            name,
            implements_interfaces: interface.implements_interfaces().map(str::to_owned).collect(),
            directives,
            fields: interface.fields().map(ingest_field_definition).collect(),
        }),
        ast::TypeDefinition::Union(union) => TypeDefinition::Union(UnionDefinition {
            description,
            name,
            directives,
            members: union.members().map(|member| member.name().to_owned()).collect(),
        }),
        ast::TypeDefinition::Enum(enm) => TypeDefinition::Enum(EnumDefinition {
            description,
            name,
            directives,
            values: enm
                .values()
                .map(|value| EnumValueDefinition {
                    description: value.description().map(|description| description.to_cow().into_owned()),
                    value: value.value().to_owned(),
                    directives: ingest_directives(value.directives()),
                })
                .collect(),
        }),
        ast::TypeDefinition::InputObject(input_object) => TypeDefinition::InputObject(InputObjectDefinition {
            description,
            name,
            directives,
            fields: input_object.fields().map(ingest_input_value_definition).collect(),
        }),
    }
}

fn ingest_field_definition(field: ast::FieldDefinition<'_>) -> FieldDefinition {
    FieldDefinition {
        description: field.description().map(|description| description.to_cow().into_owned()),
        name: field.name().to_owned(),
        arguments: field.arguments().map(ingest_input_value_definition).collect(),
        ty: ingest_type(field.ty()),
        directives: ingest_directives(field.directives()),
    }
}

fn ingest_input_value_definition(input_value: ast::InputValueDefinition<'_>) -> InputValueDefinition {
    InputValueDefinition {
        description: input_value
            .description()
            .map(|description| description.to_cow().into_owned()),
        name: input_value.name().to_owned(),
        ty: ingest_type(input_value.ty()),
        default_value: input_value.default_value().map(ingest_value),
        directives: ingest_directives(input_value.directives()),
    }
}

fn ingest_type(ty: ast::Type<'_>) -> TypeRef {
    TypeRef {
        name: ty.name().to_owned(),
        wrappers: ty
            .wrappers()
            .map(|wrapper| match wrapper {
                WrappingType::NonNull => Wrapper::NonNull,
                WrappingType::List => Wrapper::List,
            })
            .collect(),
    }
}

fn ingest_directives<'a>(directives: impl Iterator<Item = ast::Directive<'a>>) -> Vec<Directive> {
    directives
        .map(|directive| Directive {
            name: directive.name().to_owned(),
            arguments: directive
                .arguments()
                .map(|argument| (argument.name().to_owned(), ingest_value(argument.value())))
                .collect(),
        })
        .collect()
}

fn ingest_value(value: ConstValue<'_>) -> Value {
    match value {
        ConstValue::Null(_) => Value::Null,
        ConstValue::Int(n) => Value::Int(n.as_i64()),
        ConstValue::Float(n) => Value::Float(n.as_f64()),
        ConstValue::String(s) => Value::String(s.as_str().to_owned()),
        ConstValue::Boolean(b) => Value::Boolean(b.value()),
        ConstValue::Enum(enm) => Value::Enum(enm.name().to_owned()),
        ConstValue::List(list) => Value::List(list.items().map(ingest_value).collect()),
        ConstValue::Object(object) => Value::Object(
            object
                .fields()
                .map(|field| (field.name().to_owned(), ingest_value(field.value())))
                .collect(),
        ),
    }
}
