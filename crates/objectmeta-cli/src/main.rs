#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::{fs, path::Path};

use anyhow::Context as _;
use args::{Command, TransformArgs};
use clap::crate_version;
use graphql_objectmeta::{schema, ObjectMetaDirective, ObjectMetaTransformer, Registry, StackTemplate, TransformerConfig};

mod args;

const SCHEMA_FILE: &str = "schema.graphql";
const STACK_FILE: &str = "stack.json";
const STACK_MAPPING_FILE: &str = "stack-mapping.json";

fn main() -> anyhow::Result<()> {
    let args = self::args::parse();
    args.init_logging();

    let crate_version = crate_version!();
    tracing::debug!("objectmeta {crate_version}");

    match &args.command {
        Command::Transform(transform_args) => transform(transform_args),
        Command::Definition => {
            print!("{}", ObjectMetaDirective::definition());
            Ok(())
        }
    }
}

fn transform(args: &TransformArgs) -> anyhow::Result<()> {
    let config = match args.config_path() {
        Some(path) => {
            let config = fs::read_to_string(path)
                .with_context(|| format!("could not read the configuration at {}", path.display()))?;

            TransformerConfig::from_toml(&config)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None => TransformerConfig::default(),
    };

    let sdl = fs::read_to_string(&args.schema)
        .with_context(|| format!("could not read the schema at {}", args.schema.display()))?;

    let resources = fs::read_to_string(&args.resources)
        .with_context(|| format!("could not read the resources at {}", args.resources.display()))?;

    let schema = parse_schema(&sdl, &args.schema)?;
    let resources = StackTemplate::from_json(&resources)
        .with_context(|| format!("invalid stack template in {}", args.resources.display()))?;

    let mut registry = Registry::new(schema, resources);
    let transformed = ObjectMetaTransformer::new(config).transform_registry(&mut registry)?;
    let (schema, template, stack_mapping) = registry.into_parts();

    // Render everything before writing anything.
    let outputs = [
        (SCHEMA_FILE, schema.to_string()),
        (STACK_FILE, serde_json::to_string_pretty(&template)?),
        (STACK_MAPPING_FILE, serde_json::to_string_pretty(&stack_mapping)?),
    ];

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("could not create {}", args.out_dir.display()))?;

    for (file_name, contents) in outputs {
        let path = args.out_dir.join(file_name);
        fs::write(&path, contents).with_context(|| format!("could not write {}", path.display()))?;
    }

    tracing::info!(
        "Transformed {} types into {}",
        transformed.len(),
        args.out_dir.display()
    );

    Ok(())
}

fn parse_schema(sdl: &str, path: &Path) -> anyhow::Result<schema::Schema> {
    schema::from_sdl(sdl).with_context(|| format!("invalid schema in {}", path.display()))
}
