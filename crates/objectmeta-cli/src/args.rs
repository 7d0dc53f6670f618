use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod log;

pub(crate) use log::LogLevel;

use self::log::LogStyle;

pub(crate) fn parse() -> Args {
    Args::parse()
}

#[derive(Debug, Parser)]
#[command(name = "objectmeta", version)]
#[command(arg_required_else_help = true)]
/// Adds audit and soft delete metadata to the @model types of an AppSync schema
pub(crate) struct Args {
    #[command(subcommand)]
    pub command: Command,
    /// Set the logging level
    #[arg(long = "log", env = "OBJECTMETA_LOG", global = true)]
    pub log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "OBJECTMETA_LOG_STYLE", default_value_t = LogStyle::Text, global = true)]
    log_style: LogStyle,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Transform every type annotated with @objectmeta
    Transform(TransformArgs),
    /// Print the SDL definition of the @objectmeta directive
    Definition,
}

#[derive(Debug, clap::Args)]
pub(crate) struct TransformArgs {
    /// Path to the SDL schema, including the types generated for @model
    #[arg(long, short)]
    pub schema: PathBuf,
    /// Path to the CloudFormation stack holding the generated resolvers, as JSON
    #[arg(long, short)]
    pub resources: PathBuf,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "OBJECTMETA_CONFIG_PATH")]
    pub config: Option<PathBuf>,
    /// Directory receiving schema.graphql, stack.json and stack-mapping.json
    #[arg(long, short, default_value = ".")]
    pub out_dir: PathBuf,
}

impl TransformArgs {
    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

impl Args {
    /// Install the global subscriber. Logs go to stderr, stdout is kept for command output.
    pub fn init_logging(&self) {
        let filter = EnvFilter::new(self.log_level.unwrap_or_default().as_filter_str());
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        let layer = match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if atty::is(atty::Stream::Stderr) => layer.with_ansi(true).boxed(),
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        };

        tracing_subscriber::registry().with(layer).with(filter).init();
    }
}
