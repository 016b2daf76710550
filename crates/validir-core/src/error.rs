use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The declaration parsed, but its shape is not a template.
    #[error("malformed template: {msg}")]
    MalformedTemplate { msg: String },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedTemplate { msg: msg.into() }
    }
}
