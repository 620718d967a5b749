use thiserror::Error;

/// Top-level error for a run.
///
/// Every variant is unrecoverable at the point raised: the first error
/// aborts the whole run and is reported to the invoking pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed run input or response body.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("You must provide a value when mapping a secret to a name. Input: \"{0}\"")]
    MappedNameMissing(String),

    #[error("You must provide a valid path and key. Input: \"{0}\"")]
    InvalidPathAndKey(String),

    #[error("malformed header line (expected \"Name: value\"): \"{0}\"")]
    MalformedHeader(String),

    #[error("unexpected response shape from secret store: {source}. Body: {snippet}")]
    Response {
        snippet: String,
        source: serde_json::Error,
    },

    #[error("invalid field path \"{expr}\": {reason}")]
    FieldPath { expr: String, reason: String },
}

/// Invalid run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported kv-version \"{0}\" (expected \"1\" or \"2\")")]
    UnsupportedKvVersion(String),

    #[error("{0} is not set: nowhere to publish values")]
    MissingPipelineFile(&'static str),
}

/// Failed HTTP exchange with the secret store.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// A requested key was absent from a well-formed payload.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("secret key \"{selector}\" not found at path \"{path}\"")]
    KeyMissing { selector: String, path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
