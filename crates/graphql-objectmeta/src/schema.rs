//! An owned model of a GraphQL SDL document.
//!
//! The transformer reads and rewrites object and input object definitions. Every other
//! definition is kept so that rendering the model gives back an equivalent document.

mod from_sdl;
mod render_sdl;
pub(crate) mod value;

pub use self::{from_sdl::from_sdl, value::Value};

use indexmap::IndexMap;
use std::{fmt, str::FromStr};

pub const DEFAULT_MUTATION_TYPE: &str = "Mutation";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub schema_definition: Option<SchemaDefinition>,
    pub directive_definitions: Vec<DirectiveDefinition>,
    pub(crate) types: IndexMap<String, TypeDefinition>,
    pub extensions: Vec<TypeDefinition>,
}

impl Schema {
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Insert a definition, replacing the one with the same name in place.
    pub fn put(&mut self, definition: TypeDefinition) {
        self.types.insert(definition.name().to_owned(), definition);
    }

    pub fn object(&self, name: &str) -> Option<&ObjectDefinition> {
        match self.types.get(name)? {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectDefinition> + '_ {
        self.types.values().filter_map(|definition| match definition {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        })
    }

    pub fn mutation_type_name(&self) -> &str {
        self.schema_definition
            .as_ref()
            .and_then(|schema| schema.mutation.as_deref())
            .unwrap_or(DEFAULT_MUTATION_TYPE)
    }

    /// Append fields to the mutation root, creating it when the document has none.
    pub fn add_mutation_fields(&mut self, fields: impl IntoIterator<Item = FieldDefinition>) {
        let mutation_type_name = self.mutation_type_name().to_owned();

        match self.types.get_mut(&mutation_type_name) {
            Some(TypeDefinition::Object(mutation)) => mutation.fields.extend(fields),
            _ => {
                let mut mutation = ObjectDefinition::new(&mutation_type_name);
                mutation.fields.extend(fields);
                self.put(TypeDefinition::Object(mutation));

                if let Some(schema) = self.schema_definition.as_mut() {
                    schema.mutation.get_or_insert(mutation_type_name);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDefinition {
    pub directives: Vec<Directive>,
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarDefinition),
    Object(ObjectDefinition),
    Interface(ObjectDefinition),
    Union(UnionDefinition),
    Enum(EnumDefinition),
    InputObject(InputObjectDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(scalar) => &scalar.name,
            TypeDefinition::Object(object) | TypeDefinition::Interface(object) => &object.name,
            TypeDefinition::Union(union) => &union.name,
            TypeDefinition::Enum(enm) => &enm.name,
            TypeDefinition::InputObject(input) => &input.name,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            TypeDefinition::Scalar(scalar) => &scalar.directives,
            TypeDefinition::Object(object) | TypeDefinition::Interface(object) => &object.directives,
            TypeDefinition::Union(union) => &union.directives,
            TypeDefinition::Enum(enm) => &enm.directives,
            TypeDefinition::InputObject(input) => &input.directives,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDefinition> {
        match self {
            TypeDefinition::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectDefinition> {
        match self {
            TypeDefinition::InputObject(input) => Some(input),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
}

/// Object and interface definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDefinition {
    pub description: Option<String>,
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

impl ObjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ObjectDefinition {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|directive| directive.name == name)
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub value: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputObjectDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}

impl InputObjectDefinition {
    pub fn new(name: impl Into<String>, fields: Vec<InputValueDefinition>) -> Self {
        InputObjectDefinition {
            name: name.into(),
            fields,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        FieldDefinition {
            description: None,
            name: name.into(),
            arguments: Vec::new(),
            ty,
            directives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<InputValueDefinition>) -> Self {
        self.arguments = arguments;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        InputValueDefinition {
            description: None,
            name: name.into(),
            ty,
            default_value: None,
            directives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, Value)>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|(argument_name, _)| argument_name == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    NonNull,
    List,
}

/// A field or argument type. Wrappers are stored outermost first, so `[ID!]!` is
/// `[NonNull, List, NonNull]` around `ID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub wrappers: Vec<Wrapper>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            wrappers: Vec::new(),
        }
    }

    #[must_use]
    pub fn non_null(mut self) -> Self {
        if !self.is_non_null() {
            self.wrappers.insert(0, Wrapper::NonNull);
        }
        self
    }

    /// The named type once every list and non-null wrapper is removed.
    pub fn base_name(&self) -> &str {
        &self.name
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self.wrappers.first(), Some(Wrapper::NonNull))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_wrapped(name: &str, wrappers: &[Wrapper], f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match wrappers.split_first() {
                None => f.write_str(name),
                Some((Wrapper::NonNull, rest)) => {
                    write_wrapped(name, rest, f)?;
                    f.write_str("!")
                }
                Some((Wrapper::List, rest)) => {
                    f.write_str("[")?;
                    write_wrapped(name, rest, f)?;
                    f.write_str("]")
                }
            }
        }

        write_wrapped(&self.name, &self.wrappers, f)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidTypeRef(String);

impl fmt::Display for InvalidTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type reference `{}`", self.0)
    }
}

impl std::error::Error for InvalidTypeRef {}

impl FromStr for TypeRef {
    type Err = InvalidTypeRef;

    fn from_str(ty: &str) -> Result<Self, Self::Err> {
        let trimmed = ty.trim();
        let mut wrappers = Vec::new();
        let mut rest = trimmed;

        loop {
            if let Some(inner) = rest.strip_suffix('!') {
                wrappers.push(Wrapper::NonNull);
                rest = inner;
            } else if let Some(inner) = rest.strip_prefix('[').and_then(|inner| inner.strip_suffix(']')) {
                wrappers.push(Wrapper::List);
                rest = inner;
            } else {
                break;
            }
        }

        let valid_name = !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !rest.starts_with(|c: char| c.is_ascii_digit());

        let doubled_non_null = wrappers
            .windows(2)
            .any(|pair| pair[0] == Wrapper::NonNull && pair[1] == Wrapper::NonNull);

        if !valid_name || doubled_non_null {
            return Err(InvalidTypeRef(ty.to_owned()));
        }

        Ok(TypeRef {
            name: rest.to_owned(),
            wrappers,
        })
    }
}
