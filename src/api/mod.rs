//! Model Registry REST API access.

pub mod config;
pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use config::RegistryConfig;
pub use http::HttpRegistryApi;
pub use types::{
    Artifact, ArtifactList, DocArtifact, ListOptions, ListResponse, ModelArtifact, ModelVersion,
    ModelVersionList, OrderByField, RegisteredModel, SortOrder,
};

/// Read operations of the Model Registry service used during resolution.
///
/// Lookups by key fail with [`crate::Error::NotFound`] when the registry has
/// no matching entity.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Find a registered model by its exact name.
    async fn find_registered_model(&self, name: &str) -> Result<RegisteredModel>;

    /// Find a model version by name within a registered model.
    async fn find_model_version(
        &self,
        name: &str,
        parent_resource_id: &str,
    ) -> Result<ModelVersion>;

    /// List the versions of a registered model.
    async fn get_registered_model_versions(
        &self,
        registered_model_id: &str,
        options: &ListOptions,
    ) -> Result<ModelVersionList>;

    /// Fetch a model artifact by id.
    async fn get_model_artifact(&self, id: &str) -> Result<ModelArtifact>;

    /// List the artifacts of a model version.
    async fn get_model_version_artifacts(
        &self,
        model_version_id: &str,
        options: &ListOptions,
    ) -> Result<ArtifactList>;
}
