#![allow(unused_crate_dependencies)]

use graphql_objectmeta::{
    resources::{get_att, Resource},
    schema::{self, TypeDefinition},
    template::RequestContext,
    Error, ObjectMetaDirective, ObjectMetaTransformer, Registry, StackTemplate, TransformerConfig,
};
use indoc::{formatdoc, indoc};
use serde_json::json;

const CREATE_REQUEST: &str = r#"$util.toJson({"version": "2018-05-29", "operation": "PutItem"})"#;
const UPDATE_REQUEST: &str = r#"$util.toJson({"version": "2018-05-29", "operation": "UpdateItem"})"#;
const UPDATE_RESPONSE: &str = "$util.toJson($context.result)";

fn post_sdl(directive: &str) -> String {
    formatdoc! {r#"
            type Query {{
              getPost(id: ID!): Post
            }}

            type Mutation {{
              createPost(input: CreatePostInput!): Post
              updatePost(input: UpdatePostInput!): Post
            }}

            type Post @model @auth(rules: [{{allow: owner}}]) {directive} {{
              id: ID!
              title: String!
              deleted: Boolean!
            }}

            input CreatePostInput {{
              id: ID
              title: String!
              deleted: Boolean
            }}

            input UpdatePostInput {{
              id: ID!
              title: String
              deleted: Boolean
            }}
    "#}
}

fn post_resources() -> StackTemplate {
    let template = json!({
        "Resources": {
            "CreatePostResolver": {
                "Type": "AWS::AppSync::Resolver",
                "Properties": {
                    "ApiId": { "Fn::GetAtt": ["GraphQLAPI", "ApiId"] },
                    "DataSourceName": { "Fn::GetAtt": ["PostDataSource", "Name"] },
                    "TypeName": "Mutation",
                    "FieldName": "createPost",
                    "RequestMappingTemplate": CREATE_REQUEST,
                    "ResponseMappingTemplate": "$util.toJson($context.result)"
                }
            },
            "UpdatePostResolver": {
                "Type": "AWS::AppSync::Resolver",
                "Properties": {
                    "ApiId": { "Fn::GetAtt": ["GraphQLAPI", "ApiId"] },
                    "DataSourceName": { "Fn::GetAtt": ["PostDataSource", "Name"] },
                    "TypeName": "Mutation",
                    "FieldName": "updatePost",
                    "RequestMappingTemplate": UPDATE_REQUEST,
                    "ResponseMappingTemplate": UPDATE_RESPONSE
                }
            },
            "PostTable": {
                "Type": "AWS::DynamoDB::Table",
                "Properties": { "TableName": "Post" }
            }
        }
    });

    serde_json::from_value(template).unwrap()
}

fn registry(sdl: &str) -> Registry {
    Registry::new(schema::from_sdl(sdl).unwrap(), post_resources())
}

fn transform(sdl: &str) -> Result<Registry, Error> {
    let mut registry = registry(sdl);
    ObjectMetaTransformer::default().transform_registry(&mut registry)?;
    Ok(registry)
}

fn request_template(registry: &Registry, logical_id: &str) -> String {
    registry.template().resources[logical_id]
        .as_resolver()
        .and_then(|resolver| resolver.request_mapping_template())
        .unwrap()
        .to_owned()
}

fn directive(arguments: &str) -> ObjectMetaDirective {
    let schema = schema::from_sdl(&format!("type T @objectmeta{arguments} {{ id: ID }}")).unwrap();
    let directive = schema.object("T").unwrap().directive("objectmeta").unwrap();
    ObjectMetaDirective::from_directive(directive).unwrap()
}

#[test]
fn annotated_type_gets_every_meta_field() {
    let registry = transform(&post_sdl("@objectmeta")).unwrap();

    insta::assert_snapshot!(registry.schema().get("Post").unwrap(), @r###"
    type Post @model @auth(rules: [{allow: owner}]) @objectmeta {
      id: ID!
      title: String!
      deleted: Boolean!
      createdAt: Float
      createdBy: ID
      updatedAt: Float
      updatedBy: ID
      deletedAt: Float
      deletedBy: ID
    }
    "###);
}

#[test]
fn mutation_inputs_no_longer_expose_meta_fields() {
    let registry = transform(&post_sdl("@objectmeta")).unwrap();

    insta::assert_snapshot!(registry.schema().get("CreatePostInput").unwrap(), @r###"
    input CreatePostInput {
      id: ID
      title: String!
    }
    "###);

    insta::assert_snapshot!(registry.schema().get("UpdatePostInput").unwrap(), @r###"
    input UpdatePostInput {
      id: ID!
      title: String
    }
    "###);
}

#[test]
fn create_and_update_templates_are_prepended() {
    let registry = transform(&post_sdl("@objectmeta")).unwrap();
    let transformer = ObjectMetaTransformer::default();
    let directive = ObjectMetaDirective::default();

    assert_eq!(
        request_template(&registry, "CreatePostResolver"),
        format!("{}\n\n{CREATE_REQUEST}", transformer.create_template(&directive))
    );
    assert_eq!(
        request_template(&registry, "UpdatePostResolver"),
        format!("{}\n\n{UPDATE_REQUEST}", transformer.update_template(&directive))
    );
}

#[test]
fn custom_field_names_are_used_everywhere() {
    let registry = transform(&post_sdl(r#"@objectmeta(createdAtField: "madeOn")"#)).unwrap();

    let post = registry.schema().object("Post").unwrap();
    assert_eq!(post.field("madeOn").unwrap().ty.to_string(), "Float");
    assert!(post.field("createdAt").is_none());

    let create = request_template(&registry, "CreatePostResolver");
    assert!(create.contains(r#"$ctx.args.input.put("madeOn", $util.time.nowEpochMilliSeconds())"#));
    assert!(!create.contains(r#""createdAt""#));
}

#[test]
fn input_left_without_fields_is_rejected() {
    let sdl = indoc! {r#"
        type Post @model @auth @objectmeta(identityRequired: true, softDelete: false) {
          id: ID!
          deleted: Boolean!
        }

        input CreatePostInput {
          createdAt: Float
          createdBy: ID
          deleted: Boolean
        }
    "#};

    let error = transform(sdl).unwrap_err();

    assert!(error.is_configuration());
    assert_eq!(
        error.to_string(),
        "After stripping away object meta fields \"createdAt\", \"createdBy\", \"updatedAt\", \"updatedBy\", \
         \"deleted\", \"deletedAt\", \"deletedBy\", the create input for type \"Post\" cannot be created with 0 \
         fields. Add another field to type \"Post\" to continue."
    );

    let sdl = sdl.replace("  deleted: Boolean\n}", "  deleted: Boolean\n  title: String\n}");
    let registry = transform(&sdl).unwrap();

    let input = registry.schema().get("CreatePostInput").and_then(TypeDefinition::as_input_object).unwrap();
    let field_names: Vec<_> = input.fields.iter().map(|field| field.name.as_str()).collect();
    assert_eq!(field_names, ["title"]);
}

#[rstest::rstest]
#[case::nullable_deleted(
    "deleted: Boolean",
    "@objectmeta",
    r#"Type "Post" requires deletedField "deleted" to be of type "Boolean!"."#
)]
#[case::missing_deleted(
    "title: String",
    "@objectmeta",
    r#"Type "Post" requires deletedField "deleted" to be of type "Boolean!"."#
)]
#[case::timestamp_as_string(
    "deleted: Boolean!\n  createdAt: String",
    "@objectmeta",
    r#"Type "Post" requires createdAtField "createdAt" to be of type "Float"."#
)]
#[case::nullable_actor_with_required_identity(
    "deleted: Boolean!\n  updatedBy: ID",
    "@objectmeta(identityRequired: true)",
    r#"Type "Post" requires updatedByField "updatedBy" to be of type "ID!"."#
)]
#[case::renamed_flag(
    "deleted: Boolean!\n  archived: Int!",
    r#"@objectmeta(deletedField: "archived")"#,
    r#"Type "Post" requires deletedField "archived" to be of type "Boolean!"."#
)]
fn incompatible_meta_fields_break_the_contract(#[case] fields: &str, #[case] directive: &str, #[case] message: &str) {
    let sdl = format!("type Post @model @auth {directive} {{\n  id: ID!\n  {fields}\n}}");

    let error = transform(&sdl).unwrap_err();

    assert!(error.is_contract(), "{error:?}");
    assert_eq!(error.to_string(), message);
}

#[test]
fn declared_meta_fields_are_kept_as_is() {
    let sdl = indoc! {r#"
        type Post @model @auth @objectmeta(identityRequired: true, softDelete: false) {
          id: ID!
          updatedAt: Float!
          createdBy: ID!
          deleted: Boolean!
        }
    "#};

    let registry = transform(sdl).unwrap();

    insta::assert_snapshot!(registry.schema().get("Post").unwrap(), @r###"
    type Post @model @auth @objectmeta(identityRequired: true, softDelete: false) {
      id: ID!
      updatedAt: Float!
      createdBy: ID!
      deleted: Boolean!
      createdAt: Float
      updatedBy: ID!
      deletedAt: Float
      deletedBy: ID!
    }
    "###);
}

#[test]
fn soft_delete_mutation_is_synthesized() {
    let registry = transform(&post_sdl("@objectmeta")).unwrap();

    let mutation = registry.schema().object("Mutation").unwrap();
    assert_eq!(
        mutation.field("softDeletePost").unwrap().to_string(),
        "softDeletePost(id: ID!): Post"
    );

    insta::assert_snapshot!(registry.schema().get("SoftDeletePostInput").unwrap(), @r###"
    input SoftDeletePostInput {
      id: ID!
    }
    "###);

    let resolver = registry.template().resources["SoftDeletePostResolver"]
        .as_resolver()
        .unwrap();

    let properties = &resolver.properties;
    assert_eq!(properties.type_name, "Mutation");
    assert_eq!(properties.field_name, "softDeletePost");
    assert_eq!(properties.api_id, get_att("GraphQLAPI", "ApiId"));
    assert_eq!(properties.data_source_name, Some(get_att("PostDataSource", "Name")));
    assert_eq!(resolver.response_mapping_template(), Some(UPDATE_RESPONSE));

    let create_snippet = ObjectMetaTransformer::default()
        .create_template(&ObjectMetaDirective::default())
        .to_string();

    assert_eq!(
        resolver.request_mapping_template().unwrap(),
        format!("{create_snippet}\n{}", request_template(&registry, "UpdatePostResolver"))
    );
    assert!(resolver.request_mapping_template().unwrap().ends_with(UPDATE_REQUEST));

    assert_eq!(registry.stack_mapping()["SoftDeletePostResolver"], "Post");
}

#[test]
fn soft_delete_can_be_disabled() {
    let registry = transform(&post_sdl("@objectmeta(softDelete: false)")).unwrap();

    assert!(registry.schema().object("Mutation").unwrap().field("softDeletePost").is_none());
    assert!(registry.schema().get("SoftDeletePostInput").is_none());
    assert!(!registry.template().resources.contains_key("SoftDeletePostResolver"));
    assert!(registry.stack_mapping().is_empty());
}

#[test]
fn existing_soft_delete_input_is_kept() {
    let sdl = format!("{}\ninput SoftDeletePostInput {{\n  id: ID!\n  reason: String\n}}\n", post_sdl("@objectmeta"));

    let registry = transform(&sdl).unwrap();

    let input = registry
        .schema()
        .get("SoftDeletePostInput")
        .and_then(TypeDefinition::as_input_object)
        .unwrap();
    assert_eq!(input.fields.len(), 2);
}

#[test]
fn soft_delete_uses_the_declared_mutation_root() {
    let sdl = indoc! {r#"
        schema {
          query: Query
          mutation: RootMutation
        }

        type Query {
          ping: Boolean
        }

        type Post @model @auth @objectmeta {
          id: ID!
          title: String
          deleted: Boolean!
        }
    "#};

    let registry = transform(sdl).unwrap();

    assert!(registry.schema().object("RootMutation").unwrap().field("softDeletePost").is_some());
    assert!(registry.schema().get("Mutation").is_none());

    let resolver = registry.template().resources["SoftDeletePostResolver"]
        .as_resolver()
        .unwrap();
    assert_eq!(resolver.properties.type_name, "RootMutation");
}

#[test]
fn soft_delete_requires_the_update_resolver() {
    let mut registry = registry(&post_sdl("@objectmeta"));
    let mut resources = registry.template().clone();
    resources.resources.shift_remove("UpdatePostResolver");
    let mut registry_without_update = Registry::new(registry.schema().clone(), resources);

    let error = ObjectMetaTransformer::default()
        .transform_registry(&mut registry_without_update)
        .unwrap_err();

    assert!(matches!(
        &error,
        Error::MissingResolver { type_name, resource } if type_name == "Post" && resource == "UpdatePostResolver"
    ));
    assert!(error.is_configuration());

    let sdl = post_sdl("@objectmeta(softDelete: false)");
    registry = Registry::new(schema::from_sdl(&sdl).unwrap(), registry_without_update.template().clone());

    ObjectMetaTransformer::default().transform_registry(&mut registry).unwrap();

    assert!(request_template(&registry, "CreatePostResolver").starts_with("## [Start] ObjectMeta Fields. **"));
}

#[test]
fn missing_create_resolver_is_skipped() {
    let mut resources = post_resources();
    resources.resources.shift_remove("CreatePostResolver");
    let mut registry = Registry::new(schema::from_sdl(&post_sdl("@objectmeta")).unwrap(), resources);

    let transformed = ObjectMetaTransformer::default().transform_registry(&mut registry).unwrap();

    assert_eq!(transformed, ["Post"]);
    assert!(!registry.template().resources.contains_key("CreatePostResolver"));

    let update = request_template(&registry, "UpdatePostResolver");
    assert!(update.starts_with("## [Start] ObjectMeta Fields. **"));
    assert!(update.ends_with(UPDATE_REQUEST));

    let soft_delete = request_template(&registry, "SoftDeletePostResolver");
    assert!(soft_delete.ends_with(&update));
    assert!(registry.schema().get("CreatePostInput").is_some());
}

#[test]
fn resolver_without_inline_request_template_is_rejected() {
    let mut registry = registry(&post_sdl("@objectmeta"));
    let mut resources = registry.template().clone();

    if let Some(Resource::Resolver(resolver)) = resources.resources.get_mut("CreatePostResolver") {
        resolver.properties.request_mapping_template = None;
        resolver
            .properties
            .other
            .insert("RequestMappingTemplateS3Location".into(), json!("s3://bucket/create.vtl"));
    }

    registry = Registry::new(registry.schema().clone(), resources);

    let error = ObjectMetaTransformer::default().transform_registry(&mut registry).unwrap_err();

    assert_eq!(
        error.to_string(),
        "The resolver \"CreatePostResolver\" has no inline request mapping template to augment."
    );
}

#[test]
fn failures_leave_the_registry_untouched() {
    let sdl = format!(
        "{}\ntype Comment @model @auth @objectmeta(softDelete: false) {{\n  id: ID!\n  deleted: Boolean\n}}\n",
        post_sdl("@objectmeta")
    );
    let mut registry = registry(&sdl);
    let before = registry.clone();

    let error = ObjectMetaTransformer::default().transform_registry(&mut registry).unwrap_err();

    assert!(error.is_contract());
    pretty_assertions::assert_eq!(registry.schema(), before.schema());
    pretty_assertions::assert_eq!(registry.template(), before.template());
    assert!(registry.stack_mapping().is_empty());
}

#[test]
fn single_type_failure_leaves_the_context_untouched() {
    // Resolvers and inputs are rewritten before the missing soft delete flag is noticed.
    let sdl = post_sdl("@objectmeta").replace("  deleted: Boolean!\n", "");
    let mut registry = registry(&sdl);
    let before = registry.clone();

    let schema = schema::from_sdl(&sdl).unwrap();
    let post = schema.object("Post").unwrap();

    let error = ObjectMetaTransformer::default()
        .object(post, post.directive("objectmeta").unwrap(), &mut registry)
        .unwrap_err();

    assert!(error.is_contract());
    pretty_assertions::assert_eq!(registry.schema(), before.schema());
    pretty_assertions::assert_eq!(registry.template(), before.template());
}

#[test]
fn types_without_the_directive_are_ignored() {
    let sdl = format!("{}\ntype Tag @model {{\n  id: ID!\n}}\n", post_sdl("@objectmeta"));
    let mut registry = registry(&sdl);

    let transformed = ObjectMetaTransformer::default().transform_registry(&mut registry).unwrap();

    assert_eq!(transformed, ["Post"]);
    assert_eq!(registry.schema().object("Tag").unwrap().fields.len(), 1);
}

#[test]
fn missing_identity_falls_back_to_the_sentinel() {
    let template = ObjectMetaTransformer::default().create_template(&directive(""));
    let mut request = RequestContext {
        input: serde_json::from_value(json!({"title": "hello"})).unwrap(),
        now: 1_600_000_000_000,
        ..Default::default()
    };

    template.evaluate(&mut request).unwrap();

    assert_eq!(request.input["createdBy"], "-NO-IDENTITY-");
    assert_eq!(request.input["updatedBy"], "-NO-IDENTITY-");
    assert_eq!(request.input["createdAt"], 1_600_000_000_000_i64);
}

#[test]
fn required_identity_rejects_anonymous_requests() {
    let template = ObjectMetaTransformer::default().create_template(&directive("(identityRequired: true)"));

    let error = template.evaluate(&mut RequestContext::default()).unwrap_err();
    assert_eq!(error.to_string(), "Invalid identity.");

    let mut request = RequestContext {
        claims: serde_json::from_value(json!({"cognito:username": "carol"})).unwrap(),
        ..Default::default()
    };
    template.evaluate(&mut request).unwrap();
    assert_eq!(request.input["createdBy"], "carol");
}

#[test]
fn update_with_deleted_flag_records_the_deletion() {
    let template = ObjectMetaTransformer::default().update_template(&directive(""));
    let mut request = RequestContext {
        claims: serde_json::from_value(json!({"username": "dave"})).unwrap(),
        input: serde_json::from_value(json!({"id": "1", "deleted": true})).unwrap(),
        now: 7,
    };

    template.evaluate(&mut request).unwrap();

    pretty_assertions::assert_eq!(
        serde_json::Value::Object(request.input),
        json!({
            "id": "1",
            "deleted": false,
            "createdAt": 7,
            "createdBy": "dave",
            "updatedAt": 7,
            "updatedBy": "dave",
            "deletedAt": 7,
            "deletedBy": "dave",
        })
    );
}

#[test]
fn configuration_changes_the_generated_templates() {
    let config = TransformerConfig::from_toml(indoc! {r#"
        identity_claims = ["sub"]
        missing_identity_value = "anonymous"
        api_logical_id = "BlogAPI"
        snippet_block_name = "Audit Fields"
    "#})
    .unwrap();

    let mut registry = registry(&post_sdl("@objectmeta"));
    ObjectMetaTransformer::new(config).transform_registry(&mut registry).unwrap();

    let create = request_template(&registry, "CreatePostResolver");
    assert!(create.starts_with("## [Start] Audit Fields. **\n"));
    assert!(create.contains(r#"$util.defaultIfNull($ctx.identity.claims.get("sub"), "anonymous")"#));

    let resolver = registry.template().resources["SoftDeletePostResolver"]
        .as_resolver()
        .unwrap();
    assert_eq!(resolver.properties.api_id, get_att("BlogAPI", "ApiId"));
}

#[test]
fn transformed_schema_renders_to_valid_sdl() {
    let registry = transform(&post_sdl("@objectmeta")).unwrap();

    let rendered = registry.schema().to_string();
    let reparsed = schema::from_sdl(&rendered).unwrap();

    pretty_assertions::assert_eq!(&reparsed, registry.schema());
}
