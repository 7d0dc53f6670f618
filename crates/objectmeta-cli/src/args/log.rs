use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors from the transformer
    Error,
    /// Warnings and errors from the transformer
    #[default]
    Warn,
    /// Info, warning and error messages from the transformer
    Info,
    /// Debug, info, warning and error messages from the transformer
    Debug,
    /// Trace, debug, info, warning and error messages from all dependencies
    Trace,
}

impl LogLevel {
    pub(crate) fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "objectmeta=error,graphql_objectmeta=error,off",
            LogLevel::Warn => "objectmeta=warn,graphql_objectmeta=warn,off",
            LogLevel::Info => "objectmeta=info,graphql_objectmeta=info,off",
            LogLevel::Debug => "objectmeta=debug,graphql_objectmeta=debug,off",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogStyle {
    /// Standard text
    Text,
    /// JSON objects
    Json,
}

impl AsRef<str> for LogStyle {
    fn as_ref(&self) -> &str {
        match self {
            LogStyle::Text => "text",
            LogStyle::Json => "json",
        }
    }
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
