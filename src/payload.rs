// Wire shapes for POST /api/ingest. Field order in the structs is the order
// serde_json writes them, so keep `id` last: it is only present when the
// caller asked for a fixed document id.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::IngestError;

/// Tenant used when none is given on the command line.
pub const DEFAULT_TENANT: &str = "public";

/// Every uploaded document carries exactly this tag list.
pub const DEMO_TAGS: [&str; 1] = ["demo"];

/// One document as the ingestion service expects it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub tenant: String,
    pub source: String,
    pub tags: Vec<String>,
    /// Base id the service uses for the stored chunks; it generates one
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Document {
    pub fn new(text: String, tenant: &str, source: &str) -> Self {
        Document {
            text,
            tenant: tenant.to_string(),
            source: source.to_string(),
            tags: DEMO_TAGS.iter().map(|t| t.to_string()).collect(),
            id: None,
        }
    }

    /// Read the whole file at `path` as UTF-8 text and wrap it.
    pub fn load(path: impl AsRef<Path>, tenant: &str, source: &str) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| IngestError::FileAccess {
            path: path.to_path_buf(),
            source: err,
        })?;
        Ok(Document::new(text, tenant, source))
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }
}

/// Request body: a list of documents. This client always sends one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IngestPayload {
    pub documents: Vec<Document>,
}

impl IngestPayload {
    pub fn single(document: Document) -> Self {
        IngestPayload { documents: vec![document] }
    }

    pub fn to_json(&self) -> Result<String, IngestError> {
        Ok(serde_json::to_string(self)?)
    }
}
