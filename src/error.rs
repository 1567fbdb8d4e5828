//! Error types for model registry storage resolution.

use thiserror::Error;

/// Model registry storage error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The registry has no entity for the requested key
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// The registry answered with a non-success status
    #[error("model registry returned {status}: {message}")]
    Api { status: u16, message: String },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Latest-version lookup found nothing
    #[error("no versions associated to registered model {model}")]
    NoVersions { model: String },

    /// Latest-artifact lookup found no model artifact
    #[error("no model artifacts associated to model version {version_id}")]
    NoModelArtifacts { version_id: String },

    /// A registry record came back without its identifier
    #[error("{kind} returned by the model registry has no id")]
    MissingId { kind: &'static str },

    /// The resolved artifact carries no storage location
    #[error("model artifact {artifact_id} has no uri")]
    MissingArtifactUri { artifact_id: String },

    /// Malformed model-registry:// URI
    #[error("invalid model registry URI {0}, use like model-registry://{{registeredModelName}}/{{versionName}}/{{artifactId}}")]
    InvalidUri(String),

    /// Resolution failed for the named model
    #[error("unable to find model {model}: {source}")]
    ModelNotFound {
        model: String,
        #[source]
        source: Box<Error>,
    },

    /// The caller cancelled the invocation
    #[error("model registry request cancelled")]
    Cancelled,

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the downstream storage processing step
    #[error("Storage processing error: {0}")]
    Storage(String),
}

impl Error {
    /// Whether the registry reported the requested entity as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::ModelNotFound { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Result type alias for model registry storage operations.
pub type Result<T> = std::result::Result<T, Error>;
