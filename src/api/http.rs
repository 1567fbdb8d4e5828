//! HTTP implementation of [`RegistryApi`] on top of `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::config::RegistryConfig;
use super::types::{
    ArtifactList, ListOptions, ModelArtifact, ModelVersion, ModelVersionList, RegisteredModel,
    RegistryErrorBody,
};
use super::RegistryApi;
use crate::defaults;
use crate::error::{Error, Result};

const NO_QUERY: [(&str, &str); 0] = [];

/// Model Registry REST client.
#[derive(Debug, Clone)]
pub struct HttpRegistryApi {
    client: Client,
    base_url: Url,
}

impl HttpRegistryApi {
    /// Create a client for the registry described by `config`.
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let base_url = config.base_url()?;

        let mut builder = Client::builder().user_agent(defaults::USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        log::debug!("Model registry client targeting {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(&RegistryConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T, Q>(&self, url: Url, query: &Q, kind: &'static str, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        log::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                kind,
                key: key.to_string(),
            });
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<RegistryErrorBody>(&body)
                .ok()
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }
}

#[async_trait]
impl RegistryApi for HttpRegistryApi {
    async fn find_registered_model(&self, name: &str) -> Result<RegisteredModel> {
        let url = self.endpoint(&["registered_model"])?;
        self.get_json(url, &[("name", name)], "registered model", name)
            .await
    }

    async fn find_model_version(
        &self,
        name: &str,
        parent_resource_id: &str,
    ) -> Result<ModelVersion> {
        let url = self.endpoint(&["model_version"])?;
        let query = [("name", name), ("parentResourceId", parent_resource_id)];
        self.get_json(url, &query, "model version", name).await
    }

    async fn get_registered_model_versions(
        &self,
        registered_model_id: &str,
        options: &ListOptions,
    ) -> Result<ModelVersionList> {
        let url = self.endpoint(&["registered_models", registered_model_id, "versions"])?;
        self.get_json(url, options, "registered model", registered_model_id)
            .await
    }

    async fn get_model_artifact(&self, id: &str) -> Result<ModelArtifact> {
        let url = self.endpoint(&["model_artifacts", id])?;
        self.get_json(url, &NO_QUERY, "model artifact", id).await
    }

    async fn get_model_version_artifacts(
        &self,
        model_version_id: &str,
        options: &ListOptions,
    ) -> Result<ArtifactList> {
        let url = self.endpoint(&["model_versions", model_version_id, "artifacts"])?;
        self.get_json(url, options, "model version", model_version_id)
            .await
    }
}
