//! Model resolution against the Model Registry.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::{HttpRegistryApi, ListOptions, ModelArtifact, RegistryApi, RegistryConfig};
use crate::error::{Error, Result};
use crate::model::reference::ModelReference;

/// Resolves model references to concrete model artifacts.
///
/// The resolver holds no mutable state and can be shared between tasks.
#[derive(Clone)]
pub struct ModelResolver {
    api: Arc<dyn RegistryApi>,
}

impl ModelResolver {
    /// Create a resolver backed by an arbitrary registry API.
    pub fn new(api: Arc<dyn RegistryApi>) -> Self {
        Self { api }
    }

    /// Create a resolver talking HTTP to the registry described by `config`.
    pub fn with_config(config: &RegistryConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpRegistryApi::new(config)?)))
    }

    /// Create a resolver configured from `MODEL_REGISTRY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(&RegistryConfig::from_env())
    }

    /// Resolve a reference to a single model artifact.
    ///
    /// # Resolution
    /// 1. The registered model is looked up by exact name.
    /// 2. The named version is looked up under that model, or the most
    ///    recently created version is used.
    /// 3. The artifact is fetched by id, or the most recently created model
    ///    artifact of the version is used. Non-model artifacts are skipped.
    ///
    /// Every registry call is abandoned as soon as `cancel` fires.
    pub async fn find_model(
        &self,
        reference: &ModelReference,
        cancel: &CancellationToken,
    ) -> Result<ModelArtifact> {
        let model_name = reference.model_name.as_str();

        log::debug!("Looking up registered model '{}'", model_name);
        let model = cancellable(cancel, self.api.find_registered_model(model_name)).await?;
        let model_id = model.id.as_deref().ok_or(Error::MissingId {
            kind: "registered model",
        })?;

        let version = match reference.version_name.as_deref() {
            Some(version_name) => {
                log::debug!(
                    "Looking up version '{}' of model '{}'",
                    version_name,
                    model_name
                );
                // A missing version surfaces as the registry's own NotFound.
                cancellable(cancel, self.api.find_model_version(version_name, model_id)).await?
            }
            None => {
                log::debug!("Looking up latest version of model '{}'", model_name);
                let versions = cancellable(
                    cancel,
                    self.api
                        .get_registered_model_versions(model_id, &ListOptions::latest_first()),
                )
                .await?;
                latest(versions.items, |v| v.create_time_millis()).ok_or_else(|| {
                    Error::NoVersions {
                        model: model_name.to_string(),
                    }
                })?
            }
        };
        let version_id = version.id.as_deref().ok_or(Error::MissingId {
            kind: "model version",
        })?;

        let artifact = match reference.artifact_id.as_deref() {
            Some(artifact_id) => {
                log::debug!("Fetching model artifact '{}'", artifact_id);
                cancellable(cancel, self.api.get_model_artifact(artifact_id)).await?
            }
            None => {
                log::debug!("Looking up latest artifact of model version '{}'", version_id);
                let artifacts = cancellable(
                    cancel,
                    self.api
                        .get_model_version_artifacts(version_id, &ListOptions::latest_first()),
                )
                .await?;
                let model_artifacts: Vec<ModelArtifact> = artifacts
                    .items
                    .into_iter()
                    .filter_map(|a| a.into_model_artifact())
                    .collect();
                latest(model_artifacts, |a| a.create_time_millis()).ok_or_else(|| {
                    Error::NoModelArtifacts {
                        version_id: version_id.to_string(),
                    }
                })?
            }
        };

        log::info!(
            "Resolved {} to version '{}' artifact '{}' at {}",
            reference,
            version.name,
            artifact.id.as_deref().unwrap_or("<none>"),
            artifact.uri.as_deref().unwrap_or("<none>")
        );
        Ok(artifact)
    }
}

impl std::fmt::Debug for ModelResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelResolver").finish_non_exhaustive()
    }
}

async fn cancellable<T, F>(cancel: &CancellationToken, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = call => result,
    }
}

/// Pick the most recently created item.
///
/// Items arrive newest first from the registry; the scan only overrides that
/// order when a strictly newer timestamp shows up later in the page. Items
/// without a timestamp never override, nor get overridden.
fn latest<T>(items: Vec<T>, created: impl Fn(&T) -> Option<u64>) -> Option<T> {
    let mut best: Option<(Option<u64>, T)> = None;
    for item in items {
        let ts = created(&item);
        let newer = match (&best, ts) {
            (None, _) => true,
            (Some((Some(best_ts), _)), Some(ts)) => ts > *best_ts,
            (Some(_), _) => false,
        };
        if newer {
            best = Some((ts, item));
        }
    }
    best.map(|(_, item)| item)
}
