//! Custom storage URI processing for inference services.
//!
//! A [`CustomStorageProcessor`] turns a custom storage URI into a concrete
//! one, patches a copy of the inference service with it and hands the copy
//! to the regular storage initialization step.

pub mod inference_service;

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{ModelReference, ModelResolver};

pub use inference_service::{
    InferenceService, InferenceServiceSpec, ModelFormat, ModelSpec, NamespacedName, ObjectMeta,
    PredictorSpec,
};

/// Outcome of storage initialization for an inference service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedStorage {
    /// Secret holding storage credentials
    pub secret_key: Option<String>,
    /// Storage parameters for the initializer
    pub parameters: HashMap<String, String>,
    /// Local path the model is materialized at
    pub model_path: String,
    /// Optional schema location
    pub schema_path: Option<String>,
}

/// Resolves a custom storage URI and forwards to the storage initialization step.
#[async_trait]
pub trait CustomStorageProcessor: Send + Sync {
    /// Process the storage of `inference_service` described by `custom_uri`.
    ///
    /// `process_storage` receives a patched copy of the inference service and
    /// its result is returned as is. The caller's instance is never modified.
    async fn process_inference_service_storage<F, Fut>(
        &self,
        custom_uri: &Url,
        inference_service: &InferenceService,
        nname: &NamespacedName,
        cancel: &CancellationToken,
        process_storage: F,
    ) -> Result<ProcessedStorage>
    where
        F: FnOnce(InferenceService, NamespacedName) -> Fut + Send,
        Fut: Future<Output = Result<ProcessedStorage>> + Send;
}

/// Storage processor for `model-registry://` URIs.
#[derive(Debug, Clone)]
pub struct ModelRegistryProcessor {
    resolver: ModelResolver,
}

impl ModelRegistryProcessor {
    pub fn new(resolver: ModelResolver) -> Self {
        Self { resolver }
    }

    /// Create a processor whose registry client is configured from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ModelResolver::from_env()?))
    }

    pub fn resolver(&self) -> &ModelResolver {
        &self.resolver
    }
}

#[async_trait]
impl CustomStorageProcessor for ModelRegistryProcessor {
    async fn process_inference_service_storage<F, Fut>(
        &self,
        custom_uri: &Url,
        inference_service: &InferenceService,
        nname: &NamespacedName,
        cancel: &CancellationToken,
        process_storage: F,
    ) -> Result<ProcessedStorage>
    where
        F: FnOnce(InferenceService, NamespacedName) -> Fut + Send,
        Fut: Future<Output = Result<ProcessedStorage>> + Send,
    {
        let reference = ModelReference::from_uri(custom_uri)?;

        let artifact = self
            .resolver
            .find_model(&reference, cancel)
            .await
            .map_err(|e| Error::ModelNotFound {
                model: reference.model_name.clone(),
                source: Box::new(e),
            })?;

        let uri = artifact.uri.ok_or_else(|| Error::MissingArtifactUri {
            artifact_id: artifact.id.unwrap_or_default(),
        })?;

        let transformed = inference_service.with_storage_uri(uri);
        log::info!(
            "Rewrote storage of {} from {} to {}",
            nname,
            custom_uri,
            transformed.storage_uri().unwrap_or_default()
        );

        process_storage(transformed, nname.clone()).await
    }
}
