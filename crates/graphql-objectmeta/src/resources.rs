//! The CloudFormation resources generated for a GraphQL API.
//!
//! Resolvers are typed, since their mapping templates are what the transformer rewrites.
//! Any other resource is carried as raw JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    Resolver(Box<Resolver>),
    Other(Value),
}

impl Resource {
    pub fn as_resolver(&self) -> Option<&Resolver> {
        match self {
            Resource::Resolver(resolver) => Some(resolver.as_ref()),
            Resource::Other(_) => None,
        }
    }
}

impl From<Resolver> for Resource {
    fn from(resolver: Resolver) -> Self {
        Resource::Resolver(Box::new(resolver))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ResolverKind {
    #[serde(rename = "AWS::AppSync::Resolver")]
    AppSync,
}

/// An `AWS::AppSync::Resolver` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolver {
    #[serde(rename = "Type")]
    kind: ResolverKind,
    #[serde(rename = "Properties")]
    pub properties: ResolverProperties,
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Value>,
    /// Resource attributes such as `Condition`, `Metadata` or `DeletionPolicy`.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Resolver {
    pub fn new(properties: ResolverProperties) -> Self {
        Resolver {
            kind: ResolverKind::AppSync,
            properties,
            depends_on: None,
            other: Map::new(),
        }
    }

    pub fn request_mapping_template(&self) -> Option<&str> {
        self.properties.request_mapping_template.as_deref()
    }

    pub fn response_mapping_template(&self) -> Option<&str> {
        self.properties.response_mapping_template.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolverProperties {
    pub api_id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source_name: Option<Value>,
    pub type_name: String,
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_mapping_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mapping_template: Option<String>,
    /// Properties the transformer does not look at, such as `Kind` or `PipelineConfig`.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// `{ "Fn::GetAtt": [logical_id, attribute] }`
pub fn get_att(logical_id: &str, attribute: &str) -> Value {
    serde_json::json!({ "Fn::GetAtt": [logical_id, attribute] })
}

/// A CloudFormation template. Only `Resources` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackTemplate {
    #[serde(rename = "Resources", default)]
    pub resources: IndexMap<String, Resource>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl StackTemplate {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
