use serde::Deserialize;

/// Settings shared by every `@objectmeta` type of a schema.
///
/// The defaults produce the templates AppSync expects for Cognito user pools.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformerConfig {
    /// Identity claims tried in order to find the acting user.
    pub identity_claims: Vec<String>,
    /// Stored as the actor when no claim is present and identity is not required.
    pub missing_identity_value: String,
    /// Logical id of the GraphQL API resource the resolvers attach to.
    pub api_logical_id: String,
    /// Name of the block wrapping the generated template snippets.
    pub snippet_block_name: String,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        TransformerConfig {
            identity_claims: vec!["username".to_owned(), "cognito:username".to_owned()],
            missing_identity_value: "-NO-IDENTITY-".to_owned(),
            api_logical_id: "GraphQLAPI".to_owned(),
            snippet_block_name: "ObjectMeta Fields".to_owned(),
        }
    }
}

impl TransformerConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}
