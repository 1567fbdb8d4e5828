//! Model registry storage - resolves `model-registry://` storage URIs of
//! inference services to the concrete artifact locations recorded in a
//! Model Registry service.

mod defaults;
pub mod error;

pub mod api;
pub mod model;
pub mod processor;

pub use error::{Error, Result};

pub use api::{
    Artifact, ArtifactList, DocArtifact, HttpRegistryApi, ListOptions, ListResponse,
    ModelArtifact, ModelVersion, ModelVersionList, OrderByField, RegisteredModel, RegistryApi,
    RegistryConfig, SortOrder,
};
pub use model::{ModelReference, ModelResolver};
pub use processor::{
    CustomStorageProcessor, InferenceService, ModelRegistryProcessor, NamespacedName,
    ProcessedStorage,
};

pub use defaults::{
    MODEL_REGISTRY_BASE_URL_ENV, MODEL_REGISTRY_SCHEME_ENV, MODEL_REGISTRY_TIMEOUT_ENV,
    MODEL_REGISTRY_URI_SCHEME,
};

pub use tokio_util::sync::CancellationToken;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
