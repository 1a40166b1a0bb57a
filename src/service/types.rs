use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Turn `success: false` into [`Error::Service`], keeping the service's
    /// message as is.
    pub fn into_result(self, fallback: &str) -> Result<T> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(Error::Service(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub extracted_pages: Option<u32>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files: Vec<SplitFile>,
    #[serde(default)]
    pub zip_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitFile {
    pub filename: String,
    pub download_url: String,
    pub page: u32,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Ack {}
