//! Default values and environment variable names for the registry client.

pub const MODEL_REGISTRY_BASE_URL_ENV: &str = "MODEL_REGISTRY_BASE_URL";
pub const MODEL_REGISTRY_SCHEME_ENV: &str = "MODEL_REGISTRY_SCHEME";
pub const MODEL_REGISTRY_TIMEOUT_ENV: &str = "MODEL_REGISTRY_TIMEOUT_SECS";

pub const MODEL_REGISTRY_BASE_URL: &str =
    "modelregistry-sample.model-registry.svc.cluster.local:8080";
pub const MODEL_REGISTRY_SCHEME: &str = "http";
pub const MODEL_REGISTRY_BASE_PATH: &str = "/api/model_registry/v1alpha3";

/// Scheme of the custom storage URIs handled by this crate.
pub const MODEL_REGISTRY_URI_SCHEME: &str = "model-registry";

pub const USER_AGENT: &str = concat!("model-registry-storage/", env!("CARGO_PKG_VERSION"));
