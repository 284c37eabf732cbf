// src/models/mod.rs

//! Domain models for the tweet loader.

mod config;
mod document;
mod post;

// Re-export all public types
pub use config::{ApiConfig, Config, Credentials, OutputConfig};
pub use document::{Document, DocumentMeta, OutputLayer};
pub use post::{Author, Entities, Hashtag, Post, UserMention};

/// Counters collected over one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct GenerateStats {
    pub users: usize,
    pub posts_fetched: usize,
    pub documents_sent: usize,
    pub duplicates: usize,
}
