use crate::{
    names::{BOOLEAN_TYPE, FLOAT_TYPE, ID_TYPE, OBJECTMETA_DIRECTIVE},
    schema::{Directive, TypeRef, Value},
    Error,
};

const SOFT_DELETE_ARGUMENT: &str = "softDelete";
const IDENTITY_REQUIRED_ARGUMENT: &str = "identityRequired";

/// One of the bookkeeping fields managed on an `@objectmeta` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
    Deleted,
    DeletedAt,
    DeletedBy,
}

impl MetaField {
    pub const ALL: [MetaField; 7] = [
        MetaField::CreatedAt,
        MetaField::CreatedBy,
        MetaField::UpdatedAt,
        MetaField::UpdatedBy,
        MetaField::Deleted,
        MetaField::DeletedAt,
        MetaField::DeletedBy,
    ];

    /// The directive argument overriding the field name.
    pub fn argument_name(self) -> &'static str {
        match self {
            MetaField::CreatedAt => "createdAtField",
            MetaField::CreatedBy => "createdByField",
            MetaField::UpdatedAt => "updatedAtField",
            MetaField::UpdatedBy => "updatedByField",
            MetaField::Deleted => "deletedField",
            MetaField::DeletedAt => "deletedAtField",
            MetaField::DeletedBy => "deletedByField",
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            MetaField::CreatedAt => "createdAt",
            MetaField::CreatedBy => "createdBy",
            MetaField::UpdatedAt => "updatedAt",
            MetaField::UpdatedBy => "updatedBy",
            MetaField::Deleted => "deleted",
            MetaField::DeletedAt => "deletedAt",
            MetaField::DeletedBy => "deletedBy",
        }
    }

    /// The type a declared field must have. List wrappers are not checked, only the
    /// named type and, where it matters, the outer nullability.
    pub fn expected_type(self, identity_required: bool) -> TypeRef {
        match self {
            MetaField::CreatedAt | MetaField::UpdatedAt | MetaField::DeletedAt => TypeRef::named(FLOAT_TYPE),
            MetaField::CreatedBy | MetaField::UpdatedBy | MetaField::DeletedBy if identity_required => {
                TypeRef::named(ID_TYPE).non_null()
            }
            MetaField::CreatedBy | MetaField::UpdatedBy | MetaField::DeletedBy => TypeRef::named(ID_TYPE),
            MetaField::Deleted => TypeRef::named(BOOLEAN_TYPE).non_null(),
        }
    }

    /// Every field but the soft delete flag is added to the type when it is missing.
    pub fn is_synthesized(self) -> bool {
        self != MetaField::Deleted
    }

    pub(crate) fn accepts(self, ty: &TypeRef, identity_required: bool) -> bool {
        let expected = self.expected_type(identity_required);
        ty.base_name() == expected.base_name() && (!expected.is_non_null() || ty.is_non_null())
    }
}

/// The resolved arguments of an `@objectmeta` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetaDirective {
    field_names: [String; 7],
    soft_delete: bool,
    identity_required: bool,
}

impl Default for ObjectMetaDirective {
    fn default() -> Self {
        ObjectMetaDirective {
            field_names: MetaField::ALL.map(|field| field.default_name().to_owned()),
            soft_delete: true,
            identity_required: false,
        }
    }
}

impl ObjectMetaDirective {
    pub fn from_directive(directive: &Directive) -> Result<Self, Error> {
        let mut resolved = ObjectMetaDirective::default();

        for (name, value) in &directive.arguments {
            // An explicit null keeps the default.
            if *value == Value::Null {
                continue;
            }

            if name == SOFT_DELETE_ARGUMENT {
                resolved.soft_delete = boolean_argument(name, value)?;
            } else if name == IDENTITY_REQUIRED_ARGUMENT {
                resolved.identity_required = boolean_argument(name, value)?;
            } else if let Some(field) = MetaField::ALL.into_iter().find(|field| field.argument_name() == name) {
                let field_name = value.as_str().ok_or_else(|| wrong_kind(name, "String", value))?;
                resolved.field_names[field as usize] = field_name.to_owned();
            } else {
                tracing::warn!("Ignoring unknown argument `{name}` on @{OBJECTMETA_DIRECTIVE}.");
            }
        }

        Ok(resolved)
    }

    pub fn field_name(&self, field: MetaField) -> &str {
        &self.field_names[field as usize]
    }

    /// The field names, in the order of [`MetaField::ALL`].
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.field_names.iter().map(String::as_str)
    }

    pub fn is_meta_field(&self, name: &str) -> bool {
        self.field_names().any(|field_name| field_name == name)
    }

    pub fn soft_delete(&self) -> bool {
        self.soft_delete
    }

    pub fn identity_required(&self) -> bool {
        self.identity_required
    }

    /// The SDL definition of the directive.
    pub fn definition() -> &'static str {
        indoc::indoc! {r#"
            directive @objectmeta(
              createdAtField: String = "createdAt"
              createdByField: String = "createdBy"
              updatedAtField: String = "updatedAt"
              updatedByField: String = "updatedBy"
              deletedField: String = "deleted"
              deletedAtField: String = "deletedAt"
              deletedByField: String = "deletedBy"
              softDelete: Boolean = true
              identityRequired: Boolean = false
            ) on OBJECT
        "#}
    }
}

fn boolean_argument(name: &str, value: &Value) -> Result<bool, Error> {
    value.as_bool().ok_or_else(|| wrong_kind(name, "Boolean", value))
}

fn wrong_kind(name: &str, expected: &str, value: &Value) -> Error {
    Error::InvalidDirective(format!(
        "Argument \"{name}\" of @{OBJECTMETA_DIRECTIVE} must be a {expected}, got {} {value}.",
        value.kind()
    ))
}
