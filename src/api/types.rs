//! Wire types for the Model Registry REST API.
//!
//! Timestamps travel as epoch milliseconds encoded in strings, e.g.
//! `"createTimeSinceEpoch": "1712345678901"`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Arbitrary user metadata attached to registry entities.
pub type CustomProperties = HashMap<String, serde_json::Value>;

fn parse_epoch_millis(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Top-level named entity grouping model versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_properties: CustomProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

/// A revision of a registered model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_properties: CustomProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

impl ModelVersion {
    /// Creation time in epoch milliseconds, if the registry reported a parseable one.
    pub fn create_time_millis(&self) -> Option<u64> {
        parse_epoch_millis(self.create_time_since_epoch.as_deref())
    }
}

/// Storage-location record attached to a model version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_format_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_format_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom_properties: CustomProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

impl ModelArtifact {
    pub fn create_time_millis(&self) -> Option<u64> {
        parse_epoch_millis(self.create_time_since_epoch.as_deref())
    }
}

/// Documentation artifact. Never selected as a model location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
}

/// Entry of an artifact listing, tagged by `artifactType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "artifactType")]
pub enum Artifact {
    #[serde(rename = "model-artifact")]
    Model(ModelArtifact),
    #[serde(rename = "doc-artifact")]
    Doc(DocArtifact),
    /// Artifact kind this client does not know about
    #[serde(other)]
    Unknown,
}

impl Artifact {
    /// The model artifact payload, if this entry carries one.
    pub fn model_artifact(&self) -> Option<&ModelArtifact> {
        match self {
            Self::Model(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn into_model_artifact(self) -> Option<ModelArtifact> {
        match self {
            Self::Model(artifact) => Some(artifact),
            _ => None,
        }
    }
}

/// Paged list envelope returned by listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub page_size: usize,
    #[serde(default)]
    pub next_page_token: String,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let size = items.len();
        Self {
            items,
            size,
            page_size: size,
            next_page_token: String::new(),
        }
    }
}

pub type ModelVersionList = ListResponse<ModelVersion>;
pub type ArtifactList = ListResponse<Artifact>;

/// Field used to order listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderByField {
    CreateTime,
    LastUpdateTime,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query options for listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderByField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ListOptions {
    /// Most recently created first.
    pub fn latest_first() -> Self {
        Self {
            order_by: Some(OrderByField::CreateTime),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        }
    }
}

/// Error body returned by the registry on failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
