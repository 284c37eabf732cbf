//! Local filesystem sink.
//!
//! Bodies and metadata are written atomically (temp file, then rename).
//! A document counts as present once its body file exists.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{Document, DocumentMeta, OutputLayer};
use crate::storage::{DocumentSink, SendOutcome};

/// Local filesystem sink backend.
#[derive(Debug, Clone)]
pub struct LocalSink {
    root_dir: PathBuf,
}

impl LocalSink {
    /// Create a new LocalSink rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Path of a document body.
    pub fn body_path(&self, layer: OutputLayer, id: &str) -> PathBuf {
        self.root_dir.join(layer.as_str()).join(format!("{id}.xml"))
    }

    /// Path of a document's metadata sidecar.
    pub fn meta_path(&self, layer: OutputLayer, id: &str) -> PathBuf {
        self.root_dir.join(layer.as_str()).join(format!("{id}.json"))
    }

    /// Count stored document bodies per layer directory.
    pub async fn count_documents(&self, layer: OutputLayer) -> Result<usize> {
        let dir = self.root_dir.join(layer.as_str());
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut count = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().is_some_and(|ext| ext == "xml") {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(path, &bytes).await
    }
}

#[async_trait]
impl DocumentSink for LocalSink {
    async fn send_if_new(&self, doc: &Document) -> Result<SendOutcome> {
        let body_path = self.body_path(doc.layer, &doc.id);
        if tokio::fs::try_exists(&body_path).await? {
            log::debug!("{} already present, skipped", doc.uri());
            return Ok(SendOutcome::Duplicate);
        }

        // Metadata first: the body file is what marks a document as present.
        self.write_json(&self.meta_path(doc.layer, &doc.id), &DocumentMeta::from(doc))
            .await?;
        self.write_bytes(&body_path, doc.body.as_bytes()).await?;
        Ok(SendOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn doc(id: &str, x_id: &str) -> Document {
        Document {
            id: id.to_string(),
            x_id: x_id.to_string(),
            layer: OutputLayer::Contents,
            body: format!("<tweet id=\"{id}\"/>\n"),
        }
    }

    #[tokio::test]
    async fn test_send_writes_body_and_meta() {
        let tmp = TempDir::new().unwrap();
        let sink = LocalSink::new(tmp.path());

        let outcome = sink.send_if_new(&doc("abc", "antidot")).await.unwrap();
        assert_eq!(outcome, SendOutcome::Sent);

        let body = std::fs::read_to_string(sink.body_path(OutputLayer::Contents, "abc")).unwrap();
        assert_eq!(body, "<tweet id=\"abc\"/>\n");

        let meta: DocumentMeta = serde_json::from_slice(
            &std::fs::read(sink.meta_path(OutputLayer::Contents, "abc")).unwrap(),
        )
        .unwrap();
        assert_eq!(meta.uri, "urn:afs:abc");
        assert_eq!(meta.x_id, "antidot");
        assert!(!tmp.path().join("contents/abc.tmp").exists());
    }

    #[tokio::test]
    async fn test_second_send_is_duplicate() {
        let tmp = TempDir::new().unwrap();
        let sink = LocalSink::new(tmp.path());

        assert_eq!(sink.send_if_new(&doc("abc", "a")).await.unwrap(), SendOutcome::Sent);
        assert_eq!(
            sink.send_if_new(&doc("abc", "b")).await.unwrap(),
            SendOutcome::Duplicate
        );

        // The first writer wins.
        let meta = std::fs::read_to_string(sink.meta_path(OutputLayer::Contents, "abc")).unwrap();
        assert!(meta.contains("\"x_id\": \"a\""));
        assert_eq!(sink.count_documents(OutputLayer::Contents).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_layers_are_separate() {
        let tmp = TempDir::new().unwrap();
        let sink = LocalSink::new(tmp.path());

        let mut original = doc("abc", "a");
        original.layer = OutputLayer::Original;
        sink.send_if_new(&doc("abc", "a")).await.unwrap();
        assert_eq!(sink.send_if_new(&original).await.unwrap(), SendOutcome::Sent);
        assert_eq!(sink.count_documents(OutputLayer::Original).await.unwrap(), 1);
        assert_eq!(sink.count_documents(OutputLayer::Metadata).await.unwrap(), 0);
    }
}
