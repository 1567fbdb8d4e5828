//! Logical model references and the `model-registry://` URI form.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::MODEL_REGISTRY_URI_SCHEME;
use crate::error::{Error, Result};

const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A registered model, optionally pinned to a version and an artifact.
///
/// A missing version or artifact id means "latest by creation time".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelReference {
    pub model_name: String,
    pub version_name: Option<String>,
    pub artifact_id: Option<String>,
}

impl ModelReference {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            version_name: None,
            artifact_id: None,
        }
    }

    pub fn with_version(mut self, version_name: impl Into<String>) -> Self {
        self.version_name = Some(version_name.into());
        self
    }

    pub fn with_artifact_id(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    /// Parse a `model-registry://{model}[/{version}[/{artifactId}]]` URI.
    ///
    /// The host is the model name. The path, without its leading slash, must
    /// split into at most two non-empty segments. Segments are percent-decoded
    /// after splitting, so an encoded `/` stays inside its segment.
    pub fn from_uri(uri: &Url) -> Result<Self> {
        if uri.scheme() != MODEL_REGISTRY_URI_SCHEME {
            return Err(Error::InvalidUri(uri.to_string()));
        }

        let model_name = match uri.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(Error::InvalidUri(uri.to_string())),
        };

        let path = uri.path();
        let path = path.strip_prefix('/').unwrap_or(path);
        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        if segments.len() > 2 || segments.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidUri(uri.to_string()));
        }

        let decode = |segment: &str| -> Result<String> {
            percent_decode_str(segment)
                .decode_utf8()
                .map(|s| s.into_owned())
                .map_err(|_| Error::InvalidUri(uri.to_string()))
        };

        let mut reference = Self::new(model_name);
        reference.version_name = segments.first().map(|s| decode(*s)).transpose()?;
        reference.artifact_id = segments.get(1).map(|s| decode(*s)).transpose()?;
        Ok(reference)
    }
}

impl FromStr for ModelReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let uri = Url::parse(s.trim()).map_err(|_| Error::InvalidUri(s.to_string()))?;
        Self::from_uri(&uri)
    }
}

impl fmt::Display for ModelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", MODEL_REGISTRY_URI_SCHEME, self.model_name)?;
        if let Some(version) = &self.version_name {
            write!(f, "/{}", utf8_percent_encode(version, SEGMENT))?;
        }
        if let Some(artifact_id) = &self.artifact_id {
            write!(f, "/{}", utf8_percent_encode(artifact_id, SEGMENT))?;
        }
        Ok(())
    }
}
