use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read column map {path}: {source}")]
    ColumnsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse column map: {0}")]
    ColumnsFileParse(#[from] serde_yaml::Error),

    #[error("column map validation failed: {0}")]
    Validation(String),

    #[error("input sheet has no column for required field '{field}' (accepted headers: {aliases})")]
    MissingColumn { field: String, aliases: String },
}

/// Per-row failures raised before any catalog call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Artist or title is blank after trimming.
    #[error("row {row}: missing {missing}")]
    MalformedRow { row: usize, missing: &'static str },
}
