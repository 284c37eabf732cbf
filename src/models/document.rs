//! Generated documents and their output layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Content layer a document body is stored under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayer {
    #[default]
    Contents,
    Original,
    Metadata,
}

impl OutputLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputLayer::Contents => "contents",
            OutputLayer::Original => "original",
            OutputLayer::Metadata => "metadata",
        }
    }
}

impl fmt::Display for OutputLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document generated from one post, ready for a sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Lowercase hex MD5 of the post text
    pub id: String,

    /// Handle of the user whose timeline produced this document
    pub x_id: String,

    pub layer: OutputLayer,

    /// Serialized XML body
    pub body: String,
}

impl Document {
    /// Document URI, `urn:afs:<id>`.
    pub fn uri(&self) -> String {
        format!("urn:afs:{}", self.id)
    }
}

/// Sidecar metadata persisted next to a document body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMeta {
    pub uri: String,
    pub id: String,
    pub x_id: String,
    pub layer: OutputLayer,
}

impl From<&Document> for DocumentMeta {
    fn from(doc: &Document) -> Self {
        Self {
            uri: doc.uri(),
            id: doc.id.clone(),
            x_id: doc.x_id.clone(),
            layer: doc.layer,
        }
    }
}
