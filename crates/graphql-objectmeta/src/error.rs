use crate::template::EvaluationError;

/// The error type of the `@objectmeta` transformer.
///
/// Every variant is fatal: the schema being transformed must be fixed before it can be compiled.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directive is used in a way that cannot be transformed, e.g. a missing `@model`.
    #[error("{0}")]
    InvalidDirective(String),
    /// A meta field is declared on the annotated type with the wrong type.
    #[error("{0}")]
    Contract(String),
    /// The soft delete mutation is built from the update resolver, which must exist.
    #[error(
        "Type \"{type_name}\" enables soft delete, but its update resolver \"{resource}\" does not exist. \
         Make sure the type is annotated with @model and generates an update mutation."
    )]
    MissingResolver { type_name: String, resource: String },
    /// A resolver exists but its request mapping template is not inlined.
    #[error("The resolver \"{resource}\" has no inline request mapping template to augment.")]
    MissingRequestTemplate { resource: String },
    #[error("Could not parse the schema: {0}")]
    Parse(String),
    #[error(transparent)]
    Template(#[from] EvaluationError),
}

impl Error {
    /// Errors caused by how the directive or its co-generated artifacts are configured.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidDirective(_) | Error::MissingResolver { .. } | Error::MissingRequestTemplate { .. }
        )
    }

    /// Errors caused by a meta field declared with an incompatible type.
    pub fn is_contract(&self) -> bool {
        matches!(self, Error::Contract(_))
    }
}
