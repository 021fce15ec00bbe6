use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeStatusError {
    #[error("Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("Tree-sitter parse error for view: {0}")]
    ParseFailed(String),

    #[error("No open view for uri: {0}")]
    ViewNotFound(String),

    #[error("View {0} is a widget, not a document")]
    WidgetView(String),

    #[error("Request carries neither a row nor an offset")]
    MissingPosition,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
