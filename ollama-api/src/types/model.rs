//! Model management request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ndjson::StreamItem;

/// Request body for `/api/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateModelRequest {
    /// Name of the model to create.
    pub name: String,
    /// Contents of the Modelfile.
    pub modelfile: String,
    /// Whether status updates are streamed.
    #[serde(default)]
    pub stream: bool,
    /// Path to a Modelfile on the server host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Status update from `/api/create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateModelResponse {
    /// Status text; `"success"` once the model is created.
    pub status: String,
}

impl StreamItem for CreateModelResponse {}

/// Response body of `/api/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    /// Locally available models; absent or `null` when there are none.
    #[serde(default)]
    pub models: Option<Vec<ModelResponse>>,
}

impl ModelList {
    /// The models, treating an absent list as empty.
    #[must_use]
    pub fn into_models(self) -> Vec<ModelResponse> {
        self.models.unwrap_or_default()
    }
}

/// A locally available model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Model name, including tag.
    pub name: String,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Content digest.
    #[serde(default)]
    pub digest: String,
}

/// Request body for `/api/show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowRequest {
    /// Name of the model to show.
    pub name: String,
}

/// Details of a model, from `/api/show`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowResponse {
    /// Model license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Modelfile contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelfile: Option<String>,
    /// Parameters, one `name value` pair per line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    /// Prompt template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// System prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Request body for `/api/copy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRequest {
    /// Existing model name.
    pub source: String,
    /// New model name.
    pub destination: String,
}

/// Request body for `/api/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Name of the model to delete.
    pub name: String,
}
