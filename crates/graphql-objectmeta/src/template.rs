//! Request mapping template snippets as a list of typed statements.
//!
//! A [`MappingTemplate`] renders to the VTL AppSync executes through its `Display`
//! implementation. [`MappingTemplate::evaluate`] runs the same statements against a
//! [`RequestContext`], which is how the snippets are checked without an AppSync runtime.

use std::fmt;

use serde_json::{Map, Value};

use crate::schema::value::write_string_literal;

const IDENTITY_VARIABLE: &str = "$identityValue";
const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Set the identity value from the first claim present, or the fallback.
    ResolveIdentity { claims: Vec<String>, fallback: Option<String> },
    /// Fail the request when the identity value is null or empty.
    RequireIdentity,
    /// Overwrite a field of the mutation input.
    PutInput { field: String, value: InputValue },
    /// Run the nested statements only when the input sets the field to `true`.
    WhenInputTrue { field: String, then: Vec<Statement> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    /// The request time in epoch milliseconds.
    Now,
    Identity,
    Bool(bool),
}

/// A named block of statements, delimited by start and end markers when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTemplate {
    block: String,
    statements: Vec<Statement>,
}

impl MappingTemplate {
    pub fn new(block: impl Into<String>, statements: Vec<Statement>) -> Self {
        MappingTemplate {
            block: block.into(),
            statements,
        }
    }

    /// Run the statements, mutating the request input like the rendered template would.
    pub fn evaluate(&self, request: &mut RequestContext) -> Result<(), EvaluationError> {
        let mut identity = None;
        evaluate_statements(&self.statements, request, &mut identity)
    }
}

/// What a mapping template can observe from a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub claims: Map<String, Value>,
    pub input: Map<String, Value>,
    /// Epoch milliseconds.
    pub now: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Invalid identity.")]
    InvalidIdentity,
    #[error("The identity value is read before being resolved.")]
    UnresolvedIdentity,
}

fn evaluate_statements(
    statements: &[Statement],
    request: &mut RequestContext,
    identity: &mut Option<Value>,
) -> Result<(), EvaluationError> {
    for statement in statements {
        match statement {
            Statement::ResolveIdentity { claims, fallback } => {
                let resolved = claims
                    .iter()
                    .filter_map(|claim| request.claims.get(claim))
                    .find(|value| !value.is_null())
                    .cloned()
                    .or_else(|| fallback.clone().map(Value::String))
                    .unwrap_or(Value::Null);

                *identity = Some(resolved);
            }
            Statement::RequireIdentity => {
                let value = identity.as_ref().ok_or(EvaluationError::UnresolvedIdentity)?;

                let null_or_empty = match value {
                    Value::Null => true,
                    Value::String(s) => s.is_empty(),
                    _ => false,
                };

                if null_or_empty {
                    return Err(EvaluationError::InvalidIdentity);
                }
            }
            Statement::PutInput { field, value } => {
                let value = match value {
                    InputValue::Now => Value::from(request.now),
                    InputValue::Identity => identity.clone().ok_or(EvaluationError::UnresolvedIdentity)?,
                    InputValue::Bool(b) => Value::Bool(*b),
                };

                request.input.insert(field.clone(), value);
            }
            Statement::WhenInputTrue { field, then } => {
                if request.input.get(field) == Some(&Value::Bool(true)) {
                    evaluate_statements(then, request, identity)?;
                }
            }
        }
    }

    Ok(())
}

impl fmt::Display for MappingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## [Start] {}. **", self.block)?;
        write_statements(&self.statements, 0, f)?;
        write!(f, "## [End] {}. **", self.block)
    }
}

fn write_statements(statements: &[Statement], depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for statement in statements {
        let indent = INDENT.repeat(depth);

        match statement {
            Statement::ResolveIdentity { claims, fallback } => {
                write!(f, "{indent}#set( {IDENTITY_VARIABLE} = ")?;
                write_claim_lookup(claims, fallback.as_deref(), f)?;
                writeln!(f, " )")?;
            }
            Statement::RequireIdentity => {
                writeln!(f, "{indent}#if( $util.isNullOrEmpty({IDENTITY_VARIABLE}) )")?;
                writeln!(f, "{indent}{INDENT}$util.error(\"Invalid identity.\")")?;
                writeln!(f, "{indent}#end")?;
            }
            Statement::PutInput { field, value } => {
                writeln!(f, "{indent}$util.qr($ctx.args.input.put({}, {value}))", Quoted(field))?;
            }
            Statement::WhenInputTrue { field, then } => {
                if is_identifier(field) {
                    writeln!(f, "{indent}#if( $ctx.args.input.{field} == true )")?;
                } else {
                    writeln!(f, "{indent}#if( $ctx.args.input.get({}) == true )", Quoted(field))?;
                }
                write_statements(then, depth + 1, f)?;
                writeln!(f, "{indent}#end")?;
            }
        }
    }

    Ok(())
}

fn write_claim_lookup(claims: &[String], fallback: Option<&str>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match claims.split_first() {
        Some((claim, rest)) => {
            write!(f, "$util.defaultIfNull($ctx.identity.claims.get({}), ", Quoted(claim))?;
            write_claim_lookup(rest, fallback, f)?;
            f.write_str(")")
        }
        None => match fallback {
            Some(fallback) => write_string_literal(fallback, f),
            None => f.write_str("null"),
        },
    }
}

/// A string literal, escaped.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_string_literal(self.0, f)
    }
}

fn is_identifier(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Now => f.write_str("$util.time.nowEpochMilliSeconds()"),
            InputValue::Identity => f.write_str(IDENTITY_VARIABLE),
            InputValue::Bool(b) => write!(f, "{b}"),
        }
    }
}
