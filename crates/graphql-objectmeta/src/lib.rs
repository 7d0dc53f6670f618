//! The `@objectmeta` directive for AppSync model types.
//!
//! An annotated type gets creation, update and soft delete bookkeeping fields. The create and
//! update resolvers generated for the type fill them from the request identity and clock, and
//! the generated mutation inputs stop exposing them. Unless disabled, a `softDelete<Type>`
//! mutation is added as well.
//!
//! Types are transformed through a [`TransformerContext`], either one at a time with
//! [`ObjectMetaTransformer::object`] or all at once over a [`Registry`].

mod config;
mod context;
mod directive;
mod error;
pub mod names;
pub mod resources;
pub mod schema;
mod staging;
pub mod template;
mod transformer;

pub use self::{
    config::TransformerConfig,
    context::{Registry, TransformerContext},
    directive::{MetaField, ObjectMetaDirective},
    error::Error,
    resources::StackTemplate,
    staging::Staged,
    transformer::ObjectMetaTransformer,
};
